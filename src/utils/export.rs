use crate::domain::model::Product;
use crate::utils::error::Result;
use std::path::Path;

/// Writes one result page to a CSV file.
pub fn export_csv(products: &[Product], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "name", "price", "stock", "category"])?;
    for product in products {
        writer.write_record(&[
            product.id.clone(),
            product.name.clone(),
            product.price.to_string(),
            product.stock.to_string(),
            product.category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
