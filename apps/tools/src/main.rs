use anyhow::Result;
use clap::{Parser, Subcommand};
use navigator::{DirectoryMedia, Navigator, Renderer};
use shared::domain::{CategoryId, Price, SubcategoryId};
use storage::{NewProduct, Storage};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/catalog.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateCategory {
        name: String,
    },
    CreateSubcategory {
        category_id: i64,
        name: String,
    },
    CreateProduct {
        subcategory_id: i64,
        name: String,
        /// Price in minor units, e.g. 19990 for 199.90.
        price_minor: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        photo: String,
    },
    /// Resolves a token against the catalog and prints the reply as JSON.
    Press {
        token: String,
        #[arg(long, default_value = "./media")]
        media_root: String,
        #[arg(long, default_value = "RUB")]
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::CreateCategory { name } => {
            let category_id = storage.create_category(&name).await?;
            println!("created category_id={category_id}");
        }
        Command::CreateSubcategory { category_id, name } => {
            let subcategory_id = storage
                .create_subcategory(CategoryId(category_id), &name)
                .await?;
            println!("created subcategory_id={subcategory_id}");
        }
        Command::CreateProduct {
            subcategory_id,
            name,
            price_minor,
            description,
            photo,
        } => {
            let product_id = storage
                .create_product(NewProduct {
                    subcategory_id: SubcategoryId(subcategory_id),
                    name: &name,
                    description: &description,
                    price: Price::from_minor(price_minor),
                    photo: &photo,
                })
                .await?;
            println!("created product_id={product_id}");
        }
        Command::Press {
            token,
            media_root,
            currency,
        } => {
            let navigator = Navigator::new(
                storage,
                DirectoryMedia::new(media_root),
                Renderer::new(currency),
            );
            let reply = navigator.handle(&token).await;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
    }

    Ok(())
}
