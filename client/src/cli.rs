//! Command-line front end.

use crate::app::AppContext;
use crate::app::managers::ProductFormManager;
use crate::error::{AppError, AppResult};
use clap::{Parser, Subcommand};
use services::ServiceError;
use services::auth::{AuthOutcome, LoginCredentials, RegistrationDetails};
use services::model::{ImageUpload, Product, ProductCategory};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version)]
#[command(about = "Browse, favorite and add catalog products")]
pub struct Cli {
    /// Configuration file (default: ./config.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store file for the session token and favorites
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },

    /// Confirm an account with the code sent after registering
    Verify {
        #[arg(long, value_name = "USER_ID")]
        user_id: String,
        #[arg(long)]
        code: String,
    },

    /// Sign in with an email address or phone number
    Login {
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show whether a session is active
    Status,

    /// List products, favorites first
    Products {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Toggle the favorite flag of a product
    Favorite {
        #[arg(value_name = "PRODUCT_ID")]
        id: i64,
    },

    /// Add a new product
    Add {
        #[arg(long)]
        name: String,
        /// Product or Service
        #[arg(long = "type", value_name = "TYPE", value_parser = parse_category)]
        product_type: ProductCategory,
        #[arg(long)]
        price: String,
        /// Tax rate in percent (0-100)
        #[arg(long)]
        tax: String,
        /// Image file to upload with the product
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
    },
}

/// Runs one command against the context, printing results to stdout.
pub async fn execute(command: Command, ctx: &mut AppContext) -> AppResult<()> {
    match command {
        Command::Register {
            email,
            password,
            name,
            phone,
        } => {
            let details = RegistrationDetails::new(email, password, name, phone);
            let outcome = ctx.session.register(&details).await?;
            print_outcome("Registration successful", &outcome);
            if outcome.token.is_none() {
                if let Some(user_id) = &outcome.user_id {
                    println!("Verify with: catalog verify --user-id {user_id} --code <CODE>");
                }
            }
        }
        Command::Verify { user_id, code } => {
            let outcome = ctx.session.verify(&user_id, &code).await?;
            print_outcome("Verification successful", &outcome);
        }
        Command::Login {
            identifier,
            password,
        } => {
            let outcome = ctx
                .session
                .sign_in(&LoginCredentials::new(identifier, password))
                .await?;
            print_outcome("Signed in", &outcome);
        }
        Command::Logout => {
            ctx.session.sign_out()?;
            println!("Signed out");
        }
        Command::Status => {
            if ctx.session.is_authenticated() {
                println!("Signed in");
            } else {
                println!("Not signed in");
            }
        }
        Command::Products { search } => {
            require_session(ctx)?;
            ctx.product_list.fetch().await?;
            if let Some(search) = search {
                ctx.product_list.set_search_text(search).await;
                ctx.product_list.apply_search_now().await;
            }
            print_products(&ctx.product_list.filtered_products().await);
        }
        Command::Favorite { id } => {
            require_session(ctx)?;
            ctx.product_list.fetch().await?;
            match ctx.product_list.toggle_favorite(id).await {
                Some(true) => println!("Product {id} added to favorites"),
                Some(false) => println!("Product {id} removed from favorites"),
                None => {
                    return Err(ServiceError::validation("id", format!("No product with id {id}")).into());
                }
            }
        }
        Command::Add {
            name,
            product_type,
            price,
            tax,
            image,
        } => {
            require_session(ctx)?;
            let form = &mut ctx.product_form;
            form.set_name(name);
            form.set_category(product_type);
            form.set_price(price);
            form.set_tax(tax);
            if let Some(path) = image {
                form.set_image(Some(read_image(&path)?));
            }

            let created = form.submit().await?;
            println!("{} (id {})", created.message, created.product_id);
        }
    }
    Ok(())
}

/// Accepts one of the selectable categories, ignoring case.
fn parse_category(value: &str) -> Result<ProductCategory, String> {
    let categories = ProductFormManager::categories();
    categories
        .iter()
        .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
        .cloned()
        .ok_or_else(|| {
            let choices: Vec<&str> = categories.iter().map(ProductCategory::as_str).collect();
            format!("expected one of: {}", choices.join(", "))
        })
}

fn require_session(ctx: &AppContext) -> AppResult<()> {
    if ctx.session.is_authenticated() {
        Ok(())
    } else {
        Err(AppError::Auth(
            "Please sign in first with `catalog login`".to_string(),
        ))
    }
}

fn print_outcome(headline: &str, outcome: &AuthOutcome) {
    match &outcome.message {
        Some(message) => println!("{headline}: {message}"),
        None => println!("{headline}"),
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        let marker = if product.is_favorite { '*' } else { ' ' };
        let id = product
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{marker} {id:>6}  {:<30} {:<10} {:>10.2}  tax {}%",
            product.name, product.category, product.price, product.tax
        );
    }
}

/// Loads an image for upload, guessing the MIME type from the extension.
pub fn read_image(path: &Path) -> AppResult<ImageUpload> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Io(format!("Failed to read image {}: {e}", path.display())))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    let mime_type = match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image.jpg")
        .to_string();

    Ok(ImageUpload {
        bytes,
        file_name,
        mime_type: mime_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_add_command() {
        let cli = Cli::try_parse_from([
            "catalog", "add", "--name", "Pen", "--type", "Product", "--price", "10", "--tax", "5",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                name: "Pen".into(),
                product_type: ProductCategory::Product,
                price: "10".into(),
                tax: "5".into(),
                image: None,
            }
        );
    }

    #[test]
    fn type_is_matched_without_case() {
        let cli = Cli::try_parse_from([
            "catalog", "add", "--name", "Fix", "--type", "service", "--price", "10", "--tax", "5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Add {
                product_type: ProductCategory::Service,
                ..
            }
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = Cli::try_parse_from([
            "catalog", "add", "--name", "Pen", "--type", "Gadget", "--price", "10", "--tax", "5",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("expected one of: Product, Service"));
    }

    #[test]
    fn global_options_come_before_the_command() {
        let cli =
            Cli::try_parse_from(["catalog", "--store", "/tmp/s.json", "products", "-s", "pen"]).unwrap();
        assert_eq!(cli.store.as_deref(), Some(Path::new("/tmp/s.json")));
        assert_eq!(
            cli.command,
            Command::Products {
                search: Some("pen".into())
            }
        );
    }

    #[test]
    fn image_mime_type_follows_extension() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let image = read_image(file.path()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
    }

    #[test]
    fn missing_image_is_an_io_error() {
        let result = read_image(Path::new("/no/such/image.jpg"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
