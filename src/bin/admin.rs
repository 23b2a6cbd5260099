use clap::{Parser, Subcommand};
use shop_search::config::{DEFAULT_CACHE_TTL_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use shop_search::domain::model::{NewProductForm, UpdateProductForm};
use shop_search::domain::ports::ConfigProvider;
use shop_search::utils::{logger, validation};
use shop_search::ProductClient;
use std::path::PathBuf;

const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Parser)]
#[command(name = "shop-admin")]
#[command(about = "Manage the product catalog as an admin user")]
struct Args {
    /// Store server base URL
    #[arg(long, env = "SERVER_URL")]
    server_url: String,

    /// Acting admin user id
    #[arg(long)]
    admin_id: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout_seconds: u64,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the products of the acting admin
    List,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: u32,
        #[arg(long)]
        stock: u32,
        #[arg(long)]
        category: String,
        /// Product photo (png, jpg, jpeg or webp)
        #[arg(long)]
        photo: PathBuf,
    },
    /// Update fields of an existing product; unset fields keep their value
    Update {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<u32>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Delete a product
    Delete {
        #[arg(long)]
        product_id: String,
    },
}

struct AdminSettings {
    server_url: String,
    timeout_seconds: u64,
}

impl ConfigProvider for AdminSettings {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn cache_ttl_seconds(&self) -> u64 {
        DEFAULT_CACHE_TTL_SECONDS
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    validation::validate_url("server_url", &args.server_url)?;

    let settings = AdminSettings {
        server_url: args.server_url.clone(),
        timeout_seconds: args.timeout_seconds,
    };
    let client = ProductClient::new(&settings)?;

    let message = match &args.command {
        Command::List => {
            let products = client.admin_products(&args.admin_id).await?;
            for product in &products {
                println!(
                    "  {}  {}  price={}  stock={}  [{}]",
                    product.id, product.name, product.price, product.stock, product.category
                );
            }
            format!("{} product(s)", products.len())
        }
        Command::Create {
            name,
            price,
            stock,
            category,
            photo,
        } => {
            validation::validate_file_extension("photo", &photo.to_string_lossy(), PHOTO_EXTENSIONS)?;
            let form = NewProductForm {
                name: name.clone(),
                price: *price,
                stock: *stock,
                category: category.clone(),
                photo: photo.clone(),
            };
            client.create_product(&args.admin_id, &form).await?
        }
        Command::Update {
            product_id,
            name,
            price,
            stock,
            category,
            photo,
        } => {
            if let Some(photo) = photo {
                validation::validate_file_extension(
                    "photo",
                    &photo.to_string_lossy(),
                    PHOTO_EXTENSIONS,
                )?;
            }
            let form = UpdateProductForm {
                name: name.clone(),
                price: *price,
                stock: *stock,
                category: category.clone(),
                photo: photo.clone(),
            };
            client.update_product(&args.admin_id, product_id, &form).await?
        }
        Command::Delete { product_id } => {
            client.delete_product(&args.admin_id, product_id).await?
        }
    };

    println!("✅ {}", message);
    Ok(())
}
