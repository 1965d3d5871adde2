use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use quotation::config::{
    config_dir, load_config, load_logo, resolve_output_dir, resolve_path, CONFIG_TEMPLATE,
};
use quotation::document::{
    format_money, format_percent, generate_document, save_rendered, save_rendered_as,
};
use quotation::{
    Config, DetailField, ItemField, LopdfRenderer, QuotationForm, QuoteError, Result, GST_RATE,
};

#[derive(Parser)]
#[command(name = "quote")]
#[command(version, about = "Quotation builder with PDF export", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.quote or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a letterhead template
    Init,

    /// Generate a quotation PDF
    Generate {
        #[command(flatten)]
        details: DetailArgs,

        #[command(flatten)]
        items: ItemArgs,

        /// Output file or directory (default: output_dir/<client>_quotation.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Show line items and computed totals
    Totals {
        #[command(flatten)]
        items: ItemArgs,

        /// Print the form as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration summary
    Status,
}

#[derive(Args)]
struct DetailArgs {
    /// Client name (also used for the output file name)
    #[arg(long)]
    client_name: Option<String>,

    #[arg(long)]
    client_address: Option<String>,

    /// Client GST identifier
    #[arg(long)]
    client_gst: Option<String>,

    #[arg(long)]
    company_name: Option<String>,

    #[arg(long)]
    sender_address: Option<String>,

    #[arg(long)]
    subject: Option<String>,

    /// Issue date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Validity date, YYYY-MM-DD
    #[arg(long)]
    validity_date: Option<String>,

    /// Terms of payment: advance, pre-delivery or post-delivery
    #[arg(long)]
    terms: Option<String>,
}

#[derive(Args)]
struct ItemArgs {
    /// Line items in format "name:quantity:unit_price" (can be repeated)
    #[arg(short, long, value_name = "NAME:QTY:PRICE")]
    item: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Generate {
            details,
            items,
            output,
            open,
        } => cmd_generate(&cfg_dir, &details, &items.item, output, open),
        Commands::Totals { items, json } => cmd_totals(&cfg_dir, &items.item, json),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(QuoteError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized quotation config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your letterhead, bank details and footer:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Optionally set letterhead.logo to a PNG or JPEG file");
    println!();
    println!("Then generate your first quotation:");
    println!("  quote generate --client-name <name> --item <name>:<quantity>:<unit price>");

    Ok(())
}

/// Parse item input like "Sorter A:2:1000" into (name, quantity, unit price).
/// Splits from the right so names may contain colons.
fn parse_item_input(input: &str) -> Result<(&str, &str, &str)> {
    let mut parts = input.rsplitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(price), Some(quantity), Some(name)) => Ok((name, quantity, price)),
        _ => Err(QuoteError::InvalidItemFormat(input.to_string())),
    }
}

/// Feed item arguments into the form. The first item fills the initial
/// blank row; each further item is appended.
fn fill_items(form: &mut QuotationForm, items_input: &[String]) -> Result<()> {
    for (index, input) in items_input.iter().enumerate() {
        let (name, quantity, unit_price) = parse_item_input(input)?;
        if index > 0 {
            form.add_item();
        }
        form.update_item(index, ItemField::Name, name);
        form.update_item(index, ItemField::Quantity, quantity);
        form.update_item(index, ItemField::UnitPrice, unit_price);
    }
    Ok(())
}

fn check_date(value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| QuoteError::InvalidDate(value.to_string()))
}

fn fill_details(form: &mut QuotationForm, args: &DetailArgs) -> Result<()> {
    let date = match &args.date {
        Some(date) => {
            check_date(date)?;
            date.clone()
        }
        None => chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };
    form.update_details(DetailField::Date, &date)?;

    if let Some(validity) = &args.validity_date {
        check_date(validity)?;
    }

    let fields = [
        (DetailField::ClientName, &args.client_name),
        (DetailField::ClientAddress, &args.client_address),
        (DetailField::ClientGst, &args.client_gst),
        (DetailField::CompanyName, &args.company_name),
        (DetailField::SenderAddress, &args.sender_address),
        (DetailField::Subject, &args.subject),
        (DetailField::ValidityDate, &args.validity_date),
        (DetailField::TermsOfPayment, &args.terms),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.update_details(field, value)?;
        }
    }
    Ok(())
}

/// Generate a quotation PDF
fn cmd_generate(
    cfg_dir: &Path,
    details: &DetailArgs,
    items_input: &[String],
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let mut form = QuotationForm::with_tax_rate(config.quotation.tax_rate);
    fill_details(&mut form, details)?;
    fill_items(&mut form, items_input)?;

    let logo = load_logo(&config, cfg_dir)?;
    let totals = form.totals();
    let rendered = generate_document(
        form.details(),
        form.items(),
        &totals,
        &config,
        logo,
        &LopdfRenderer::new(),
    )?;

    let pdf_path = match output {
        Some(path) if path.is_dir() => save_rendered(&rendered, &path)?,
        Some(path) => {
            save_rendered_as(&rendered, &path)?;
            path
        }
        None => {
            let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
            save_rendered(&rendered, &output_dir)?
        }
    };

    println!("Generated {}", rendered.file_name);
    println!("  Client: {}", form.details().client_name);
    println!("  Items:  {}", form.items().len());
    println!("  Total:  {}", format_money(totals.grand_total));
    println!("  Saved:  {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DESCRIPTION")]
    name: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "UNIT PRICE")]
    unit_price: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Show line items and totals without rendering anything
fn cmd_totals(cfg_dir: &Path, items_input: &[String], json: bool) -> Result<()> {
    let config: Option<Config> = if cfg_dir.exists() {
        Some(load_config(cfg_dir)?)
    } else {
        None
    };
    let tax_rate = config.as_ref().map_or(GST_RATE, |c| c.quotation.tax_rate);
    let tax_label = config
        .as_ref()
        .map_or("GST", |c| c.quotation.tax_label.as_str());

    let mut form = QuotationForm::with_tax_rate(tax_rate);
    fill_items(&mut form, items_input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    let rows: Vec<ItemRow> = form
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| ItemRow {
            index: idx + 1,
            name: item.name().to_string(),
            quantity: item.quantity().to_string(),
            unit_price: item.unit_price().to_string(),
            amount: format_money(item.amount()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let totals = form.totals();
    println!("Total Amount: {:>12}", format_money(totals.total_amount));
    println!(
        "{} ({}%):    {:>12}",
        tax_label,
        format_percent(totals.tax_rate),
        format_money(totals.gst)
    );
    println!("Grand Total:  {:>12}", format_money(totals.grand_total));

    Ok(())
}

/// Show configuration summary
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;

    println!("Quotation Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Seller:           {}", config.letterhead.name);
    println!(
        "Tax:              {} {}%",
        config.quotation.tax_label,
        format_percent(config.quotation.tax_rate)
    );
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.pdf.output_dir, cfg_dir).display()
    );
    match config.letterhead.logo.as_deref() {
        Some(logo) => println!("Logo:             {}", resolve_path(logo, cfg_dir).display()),
        None => println!("Logo:             (none)"),
    }

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}
