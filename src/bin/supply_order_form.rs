use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use supply_order_form::{
    config::{self, AppConfig},
    configuration::{InMemoryConfiguration, ShopConfiguration, TableConfiguration},
    db,
    pdf::{PdfContext, PdfGenerator, SupplyOrderForm},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "supply-order-form",
    about = "Render supply order forms to HTML ready for PDF conversion",
    version
)]
struct Cli {
    /// Supply order to render; repeat to print several orders in one document
    #[arg(long = "order-id", required = true, action = ArgAction::Append)]
    order_ids: Vec<i64>,

    /// Directory receiving the rendered document
    #[arg(long)]
    output: Option<PathBuf>,

    /// Shop whose configuration and logo are used
    #[arg(long)]
    shop_id: Option<i64>,

    /// Directory holding default.toml and environment overrides
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Where shop settings (logo, name, phone...) come from
    #[arg(long, value_enum, default_value_t = ShopSettingsSource::Table)]
    shop_settings: ShopSettingsSource,

    #[arg(long, action = ArgAction::SetTrue, help = "Print a JSON summary of the written file")]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShopSettingsSource {
    /// The `configuration` table of the database
    Table,
    /// The `[shop]` section of the configuration files
    File,
}

#[derive(Serialize)]
struct RenderSummary {
    filename: String,
    path: PathBuf,
    orders: Vec<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config_from(&cli.config_dir)
        .with_context(|| format!("failed to load configuration from {}", cli.config_dir.display()))?;
    if let Some(shop_id) = cli.shop_id {
        cfg.pdf.shop_id = shop_id;
    }
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::check_connection(&pool).await?;
    if cfg.auto_migrate {
        db::run_migrations(&pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }
    let pool = Arc::new(pool);

    let shop_settings = load_shop_settings(&cfg, &pool, cli.shop_settings).await?;
    let context = Arc::new(
        PdfContext::from_config(&cfg.pdf, pool.clone(), shop_settings)
            .context("failed to prepare the document context")?,
    );

    let mut forms = Vec::with_capacity(cli.order_ids.len());
    for id in &cli.order_ids {
        let form = SupplyOrderForm::load(*id, context.clone())
            .await
            .with_context(|| format!("failed to load supply order {}", id))?;
        forms.push(form);
    }

    let document = PdfGenerator::new().render(&mut forms).await?;
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&cfg.pdf.output_dir));
    let path = document.write_to(&output)?;
    info!(filename = %document.filename, path = %path.display(), "supply order form rendered");
    db::close_pool(pool.as_ref().clone()).await?;

    if cli.json {
        let summary = RenderSummary {
            filename: document.filename,
            path,
            orders: cli.order_ids,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} -> {}", document.filename, path.display());
    }

    Ok(())
}

async fn load_shop_settings(
    cfg: &AppConfig,
    pool: &db::DbPool,
    source: ShopSettingsSource,
) -> Result<Arc<dyn ShopConfiguration>> {
    Ok(match source {
        ShopSettingsSource::Table => Arc::new(
            TableConfiguration::load(pool, cfg.pdf.shop_id)
                .await
                .context("failed to read shop configuration")?,
        ),
        ShopSettingsSource::File => Arc::new(InMemoryConfiguration::from_map(&cfg.shop)),
    })
}
