use services::ServiceError;

/// Core validation trait that all validators must implement.
///
/// Validators are small and composable; the product form chains several of
/// them and stops at the first failure.
///
/// # Examples
///
/// ```
/// use catalog::validation::{RequiredField, Validator};
///
/// let validator = RequiredField::new("name", "Product name is required");
/// assert!(validator.validate("Pen").is_ok());
/// assert!(validator.validate("").is_err());
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Rejects empty (or whitespace-only) text.
pub struct RequiredField {
    field: &'static str,
    message: &'static str,
}

impl RequiredField {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    /// The error reported when the field is missing.
    pub fn error(&self) -> ServiceError {
        ServiceError::validation(self.field, self.message)
    }
}

impl Validator<str> for RequiredField {
    type Error = ServiceError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            Err(self.error())
        } else {
            Ok(())
        }
    }
}

/// Accepts text that parses as a finite decimal inside a range.
pub struct DecimalRange {
    field: &'static str,
    message: &'static str,
    min: f64,
    max: f64,
    min_inclusive: bool,
}

impl DecimalRange {
    /// Strictly positive amount.
    pub const fn positive(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            message,
            min: 0.0,
            max: f64::MAX,
            min_inclusive: false,
        }
    }

    /// Inclusive range `[min, max]`.
    pub const fn inclusive(field: &'static str, message: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            message,
            min,
            max,
            min_inclusive: true,
        }
    }

    /// Parses `input`, returning the value when it satisfies the range.
    pub fn parse(&self, input: &str) -> Result<f64, ServiceError> {
        let value = input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ServiceError::validation(self.field, self.message))?;

        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        if above_min && value <= self.max {
            Ok(value)
        } else {
            Err(ServiceError::validation(self.field, self.message))
        }
    }
}

impl Validator<str> for DecimalRange {
    type Error = ServiceError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        self.parse(input).map(|_| ())
    }
}

pub const PRODUCT_NAME: RequiredField = RequiredField::new("name", "Product name is required");
pub const PRODUCT_TYPE: RequiredField = RequiredField::new("type", "Product type is required");
pub const PRODUCT_PRICE: DecimalRange = DecimalRange::positive("price", "Please enter a valid price");
pub const PRODUCT_TAX: DecimalRange =
    DecimalRange::inclusive("tax", "Please enter a valid tax rate (0-100)", 0.0, 100.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_be_strictly_positive() {
        assert!(PRODUCT_PRICE.validate("0").is_err());
        assert!(PRODUCT_PRICE.validate("-5").is_err());
        assert_eq!(PRODUCT_PRICE.parse("0.01").unwrap(), 0.01);
        assert_eq!(PRODUCT_PRICE.parse(" 12.5 ").unwrap(), 12.5);
    }

    #[test]
    fn tax_bounds_are_inclusive() {
        assert!(PRODUCT_TAX.validate("0").is_ok());
        assert!(PRODUCT_TAX.validate("100").is_ok());
        assert!(PRODUCT_TAX.validate("101").is_err());
        assert!(PRODUCT_TAX.validate("-1").is_err());
        assert!(PRODUCT_TAX.validate("100.0001").is_err());
    }

    #[test]
    fn non_numbers_are_rejected() {
        for input in ["", "abc", "NaN", "inf", "1,5"] {
            let err = PRODUCT_PRICE.validate(input).unwrap_err();
            assert_eq!(err.field(), Some("price"), "input {input:?}");
        }
    }

    #[test]
    fn required_field_reports_its_field() {
        let err = PRODUCT_TYPE.validate("  ").unwrap_err();
        assert_eq!(err.field(), Some("type"));
        assert_eq!(err.to_string(), "Product type is required");
    }
}
