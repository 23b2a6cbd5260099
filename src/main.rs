use anyhow::Context;
use clap::Parser;
use shop_search::config::toml_config::TomlConfig;
use shop_search::core::search_page::{ResultsView, SearchPage};
use shop_search::domain::model::{CartAction, CartItem};
use shop_search::domain::ports::{CartStore, Notifier};
use shop_search::utils::{export, logger, validation::Validate};
use shop_search::{CliConfig, ProductClient};
use std::sync::{Arc, Mutex};

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

#[derive(Clone, Default)]
struct SessionCart {
    items: Arc<Mutex<Vec<CartItem>>>,
}

impl CartStore for SessionCart {
    fn dispatch(&self, action: CartAction) {
        match action {
            CartAction::Add(item) => self.items.lock().unwrap().push(item),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting shop-search CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        let file = TomlConfig::load(&path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        file.validate()?;
        config.merge_file(&file)?;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = ProductClient::new(&config)?;
    let cart = SessionCart::default();
    let session_items = cart.clone();
    let mut page = SearchPage::new(client, cart, TerminalNotifier);

    page.set_search(config.search.clone());
    page.set_sort(config.sort);
    page.set_max_price(config.effective_max_price());
    page.set_category(config.category.clone());
    page.set_page(config.page);

    if page.load_categories().await.is_ok() && !page.categories().is_empty() {
        println!("Categories: {}", page.categories().join(", "));
    }

    if page.refresh().await.is_err() {
        // the notifier already reported the failure
        std::process::exit(1);
    }

    if let ResultsView::Grid {
        products,
        pagination,
    } = page.view()
    {
        println!("Products: {}", products.len());
        for product in &products {
            println!(
                "  {}  {}  price={}  stock={}  [{}]",
                product.id, product.name, product.price, product.stock, product.category
            );
        }
        if let Some(pagination) = &pagination {
            println!("{}", pagination.label());
        }

        if let Some(path) = &config.export {
            export::export_csv(&products, path)?;
            println!(
                "📁 Exported {} product(s) to {}",
                products.len(),
                path.display()
            );
        }

        if let Some(id) = &config.add {
            match products.iter().find(|product| &product.id == id) {
                Some(product) => {
                    page.add_to_cart(CartItem::from_product(product, 1));
                    let count = session_items.items.lock().unwrap().len();
                    tracing::info!("Cart now holds {} item(s)", count);
                }
                None => eprintln!("❌ No product {} on this page", id),
            }
        }
    }

    Ok(())
}
