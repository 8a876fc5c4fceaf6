use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use catalog_client::config::{DEFAULT_BASE_URL, DEFAULT_TOKEN_FILE};
use catalog_client::models::{
    CategoryCreateRequest, Credentials, PicturePayload, ProductCreateRequest, ProductsQuery,
};
use catalog_client::{ApiClient, ApiError, ClientConfig, FileTokenStore, SessionController, SessionState, TokenStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to read picture file {path}: {source}")]
    PictureRead { path: PathBuf, source: std::io::Error },
    #[error("output encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Catalog API client CLI")]
struct Cli {
    #[arg(long, env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "CATALOG_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a session token and persist it.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session token.
    Logout,
    /// Show the current session state.
    Session,
    Product(ProductCommand),
    Category(CategoryCommand),
}

#[derive(Args, Debug)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductSubcommand {
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category_id: Option<i64>,
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        discontinued: Option<bool>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long)]
        category_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
enum CategorySubcommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Path of an image to attach")]
        picture: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    config.base_url = cli.base_url.trim_end_matches('/').to_string();
    config.token_file = cli.token_file;

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let client = Arc::new(ApiClient::new(&config, store)?);
    let controller = Arc::new(SessionController::new(Arc::clone(&client)));
    controller.initialize();
    let _listener = controller.spawn_invalidation_listener();

    match cli.command {
        Command::Login { username, password } => {
            controller.login(&Credentials { username, password }).await?;
            println!("logged in");
            Ok(())
        }
        Command::Logout => {
            controller.logout();
            println!("logged out");
            Ok(())
        }
        Command::Session => {
            println!("{}", state_label(controller.state()));
            Ok(())
        }
        Command::Product(product) => run_product(&client, product).await,
        Command::Category(category) => run_category(&client, category).await,
    }
}

async fn run_product(client: &ApiClient, product: ProductCommand) -> Result<(), CliError> {
    match product.command {
        ProductSubcommand::List {
            page,
            per_page,
            name,
            category_id,
            available,
            discontinued,
            min_price,
            max_price,
        } => {
            let query = ProductsQuery {
                page,
                per_page,
                name,
                category_id,
                available,
                discontinued,
                min_price,
                max_price,
            };
            let response = client.list_products(&query).await?;
            if response.is_past_end() {
                eprintln!("page {} is past the last page ({})", response.page, response.total_pages);
            }
            print_json(&response)
        }
        ProductSubcommand::Create { name, slug, description, price, stock, category_id } => {
            let payload = ProductCreateRequest { name, slug, description, price, stock, category_id };
            let created = client.create_product(&payload).await?;
            print_json(&created)
        }
    }
}

async fn run_category(client: &ApiClient, category: CategoryCommand) -> Result<(), CliError> {
    match category.command {
        CategorySubcommand::List => {
            let categories = client.list_categories().await?;
            print_json(&categories)
        }
        CategorySubcommand::Get { id } => {
            let found = client.get_category(id).await?;
            print_json(&found)
        }
        CategorySubcommand::Create { name, slug, description, picture } => {
            let picture = match picture {
                Some(path) => Some(read_picture(&path)?),
                None => None,
            };
            let payload = CategoryCreateRequest { name, slug, description, picture };
            let created = client.create_category(&payload).await?;
            print_json(&created)
        }
    }
}

fn read_picture(path: &Path) -> Result<PicturePayload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::PictureRead { path: path.to_path_buf(), source })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "picture".to_string());
    Ok(PicturePayload { file_name, content_type: guess_content_type(path).to_string(), bytes })
}

fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Loading => "loading",
        SessionState::Authenticated => "authenticated",
        SessionState::Unauthenticated => "unauthenticated",
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
