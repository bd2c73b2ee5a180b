//! Product catalog commands.

use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;

use ecopuls_client::resources::{ImageSource, ProductController, ProductForm};
use ecopuls_core::{ProductId, Variant};

use super::{Context, confirm};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List the catalog
    List,
    /// Create a product (admin)
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Scalar price; ignored for display once variants exist
        #[arg(long, default_value = "0")]
        price: Decimal,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Upload a local image file (preferred over --image-url)
        #[arg(long)]
        image_file: Option<PathBuf>,

        /// External image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Variant spec `label:price:dimension`, repeatable
        #[arg(long = "size")]
        sizes: Vec<String>,
    },
    /// Update a product (admin)
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(long, default_value = "0")]
        price: Decimal,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long)]
        image_file: Option<PathBuf>,

        #[arg(long)]
        image_url: Option<String>,

        /// Variant spec `label:price:dimension`, repeatable
        #[arg(long = "size")]
        sizes: Vec<String>,
    },
    /// Delete a product (admin)
    Delete {
        /// Product id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn dispatch(
    ctx: &Context,
    action: ProductAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = ProductController::new(ctx.client.clone());

    match action {
        ProductAction::List => {
            let products = controller.list().await?;
            if products.is_empty() {
                println!("No products yet.");
            }
            for product in products {
                let image = product
                    .image_url
                    .as_deref()
                    .map_or_else(String::new, |u| format!("  {}", ctx.client.resolve_image_url(u)));
                println!(
                    "{}  {}  ₹{}{}",
                    product.id,
                    product.name,
                    product.list_price(),
                    image
                );
                for (index, variant) in product.sizes.iter().enumerate() {
                    println!(
                        "    [{index}] {}  ₹{}  {}",
                        variant.label, variant.price, variant.dimension
                    );
                }
            }
        }
        ProductAction::Add {
            name,
            price,
            description,
            image_file,
            image_url,
            sizes,
        } => {
            let form = build_form(name, price, description, image_file, image_url, &sizes)?;
            let created = controller.create(form).await?;
            println!("Created product {} ({})", created.name, created.id);
        }
        ProductAction::Update {
            id,
            name,
            price,
            description,
            image_file,
            image_url,
            sizes,
        } => {
            let form = build_form(name, price, description, image_file, image_url, &sizes)?;
            let updated = controller.update(&ProductId::new(id), form).await?;
            println!("Updated product {} ({})", updated.name, updated.id);
        }
        ProductAction::Delete { id, yes } => {
            if !confirm("Delete this product?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let id = ProductId::new(id);
            controller.remove(&id).await?;
            println!("Deleted product {id}");
        }
    }
    Ok(())
}

fn build_form(
    name: String,
    price: Decimal,
    description: String,
    image_file: Option<PathBuf>,
    image_url: Option<String>,
    sizes: &[String],
) -> Result<ProductForm, Box<dyn std::error::Error>> {
    // File upload is preferred when both image options are given.
    let image = match (image_file, image_url) {
        (Some(path), _) => ImageSource::File(path),
        (None, Some(url)) => ImageSource::Url(url),
        (None, None) => ImageSource::None,
    };

    let sizes = sizes
        .iter()
        .map(|spec| parse_variant(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductForm {
        name,
        price,
        description,
        image,
        sizes,
    })
}

/// Parse a `label:price:dimension` variant spec. The dimension part is
/// optional and may itself contain colons.
fn parse_variant(spec: &str) -> Result<Variant, String> {
    let mut parts = spec.splitn(3, ':');
    let label = parts
        .next()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| format!("invalid variant spec '{spec}': missing label"))?;
    let price = parts
        .next()
        .ok_or_else(|| format!("invalid variant spec '{spec}': missing price"))?
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid variant spec '{spec}': bad price ({e})"))?;
    let dimension = parts.next().unwrap_or("").trim().to_string();

    Ok(Variant {
        label: label.trim().to_string(),
        price,
        dimension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_parse_variant_full_spec() {
        let variant = parse_variant("4 inch:299:8*11.5 cm").expect("parse");
        assert_eq!(variant.label, "4 inch");
        assert_eq!(variant.price, dec!(299));
        assert_eq!(variant.dimension, "8*11.5 cm");
    }

    #[test]
    fn test_parse_variant_without_dimension() {
        let variant = parse_variant("Large:499").expect("parse");
        assert_eq!(variant.dimension, "");
    }

    #[test]
    fn test_parse_variant_bad_price() {
        assert!(parse_variant("Large:cheap").is_err());
        assert!(parse_variant(":299:x").is_err());
    }
}
