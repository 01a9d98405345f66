use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, info_span};

use tenta_cli::exit::ExitStatus;
use tenta_cli::logging::redact_value;
use tenta_cli::render::records_to_csv;
use tenta_cli::settings::{MergeSettings, save_settings};
use tenta_ingest::read_table;
use tenta_model::{MergeOptions, MergeOutcome, RecordStatus};
use tenta_store::{
    DocumentStore, JsonFileStore, ProductDocument, ProductPatch, QueueAction, Session,
    SessionAction, find_by_barcode, sanitize_id, search, write_backup,
};
use tenta_transform::{
    DateRange, LegacyProduct, Reconciler, ValidityWindow, import_legacy_products,
    parse_price_text,
};

use crate::cli::{
    BackupArgs, EditArgs, ImportArgs, ImportLegacyArgs, InputArgs, MergeArgs, MergeFlags,
    SearchArgs, SettingsArgs, ShowArgs, StoreArg,
};
use crate::summary::{
    print_commit, print_counters, print_legacy, print_product, print_products, print_records,
};

/// Settings overridden by command-line flags.
fn merge_options(settings: &MergeSettings, flags: &MergeFlags) -> MergeOptions {
    let mut options = settings.merge.clone();
    if let Some(policy) = flags.policy {
        options = options.with_validity_policy(policy.into());
    }
    if let Some(months) = flags.window_months {
        options = options.with_window_months(months);
    }
    if let Some(epoch) = flags.epoch {
        options = options.with_serial_epoch(epoch.into());
    }
    if let Some(placeholder) = &flags.barcode_placeholder {
        options = options.with_barcode_placeholder(Some(placeholder.clone()));
    }
    options
}

fn store_path(settings: &MergeSettings, arg: &StoreArg) -> Result<PathBuf> {
    arg.store
        .clone()
        .or_else(|| settings.store_path.clone())
        .ok_or_else(|| anyhow!("no product store: pass --store or set store_path in settings"))
}

fn open_store(settings: &MergeSettings, arg: &StoreArg) -> Result<JsonFileStore> {
    let path = store_path(settings, arg)?;
    JsonFileStore::open(&path).with_context(|| format!("open product store {}", path.display()))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

struct Merged {
    outcome: MergeOutcome,
    window: ValidityWindow,
    as_of: NaiveDate,
}

fn merge_inputs(input: &InputArgs, options: &MergeOptions) -> Result<Merged> {
    let as_of = input.as_of.unwrap_or_else(today);
    let equivalences = read_table(&input.equivalences)
        .with_context(|| format!("read equivalences {}", input.equivalences.display()))?;
    let prices = read_table(&input.prices)
        .with_context(|| format!("read price list {}", input.prices.display()))?;
    let reconciler =
        Reconciler::from_table(&equivalences, options.clone(), as_of).context("build reconciler")?;
    let outcome = reconciler.merge_table(&prices).context("merge")?;
    Ok(Merged {
        outcome,
        window: reconciler.window(),
        as_of,
    })
}

pub fn run_merge(args: &MergeArgs, settings: &MergeSettings) -> Result<()> {
    let options = merge_options(settings, &args.flags);
    let merged = merge_inputs(&args.input, &options)?;
    let only = args.only.map(RecordStatus::from);
    let records: Vec<_> = merged
        .outcome
        .records
        .iter()
        .filter(|record| only.is_none_or(|status| record.status == status))
        .collect();

    if args.json {
        let json = serde_json::json!({
            "asOf": merged.as_of,
            "counters": merged.outcome.counters,
            "records": records,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if args.csv {
        print!("{}", records_to_csv(records.iter().copied())?);
    } else {
        print_counters(&merged.outcome.counters, &merged.window, merged.as_of);
        print_records(&records);
    }
    Ok(())
}

pub fn run_import(args: &ImportArgs, settings: &MergeSettings) -> Result<ExitStatus> {
    let options = merge_options(settings, &args.flags);
    let merged = merge_inputs(&args.input, &options)?;
    print_counters(&merged.outcome.counters, &merged.window, merged.as_of);

    let mut session =
        Session::new().apply(SessionAction::Queue(QueueAction::EnqueueOutcome(merged.outcome)));
    if args.dry_run {
        println!("Dry run: {} products would be written.", session.queue.len());
        return Ok(ExitStatus::Success);
    }

    let span = info_span!("import", queued = session.queue.len());
    let _guard = span.enter();
    let mut store = open_store(settings, &args.store)?;
    let report = session.commit(&mut store).context("write products")?;
    print_commit(&report, session.total_writes, store.path());
    Ok(ExitStatus::from_report(&report))
}

pub fn run_search(args: &SearchArgs, settings: &MergeSettings) -> Result<()> {
    let store = open_store(settings, &args.store)?;
    let documents = store.list()?;
    let hits = search(&documents, &args.term);
    debug!(term = redact_value(&args.term), hits = hits.len(), "catalog search");
    if hits.is_empty() {
        println!("No products match \"{}\".", args.term);
        return Ok(());
    }
    print_products(&hits);
    Ok(())
}

pub fn run_show(args: &ShowArgs, settings: &MergeSettings) -> Result<()> {
    let store = open_store(settings, &args.store)?;
    let document = match store.get(&sanitize_id(&args.key))? {
        Some(document) => document,
        None => {
            let documents = store.list()?;
            find_by_barcode(&documents, &args.key)
                .cloned()
                .ok_or_else(|| anyhow!("no product with id or barcode {}", args.key))?
        }
    };
    print_product(&document);
    Ok(())
}

pub fn run_edit(args: &EditArgs, settings: &MergeSettings) -> Result<()> {
    let mut patch = ProductPatch::new();
    if let Some(text) = &args.price {
        let price = parse_price_text(text).ok_or_else(|| anyhow!("invalid price: {text}"))?;
        patch = patch.with_price(price);
    }
    if let Some(url) = &args.photo_url {
        patch = patch.with_photo_url(url.clone());
    }
    if patch.is_empty() {
        bail!("nothing to change: pass --price or --photo-url");
    }

    let mut store = open_store(settings, &args.store)?;
    let id = sanitize_id(&args.id);
    let document = store
        .patch(&id, &patch)
        .with_context(|| format!("edit product {id}"))?;
    store.flush().context("save product store")?;
    info!(id = redact_value(&id), "product edited");
    print_product(&document);
    Ok(())
}

pub fn run_backup(args: &BackupArgs, settings: &MergeSettings) -> Result<()> {
    let store = open_store(settings, &args.store)?;
    let dir = args
        .dir
        .clone()
        .or_else(|| settings.backup_dir.clone())
        .ok_or_else(|| anyhow!("no backup folder: pass --dir or set backup_dir in settings"))?;
    let documents = store.list()?;
    let path = write_backup(&documents, &dir, Utc::now()).context("write backup")?;
    println!("Backed up {} products to {}", documents.len(), path.display());
    Ok(())
}

fn read_legacy(path: &Path) -> Result<Vec<LegacyProduct>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parse legacy products {}", path.display()))
}

pub fn run_import_legacy(args: &ImportLegacyArgs, settings: &MergeSettings) -> Result<ExitStatus> {
    let range = DateRange::new(args.from, args.to).context("validity range")?;
    let epoch = args.epoch.map_or(settings.merge.serial_epoch, Into::into);
    let products = read_legacy(&args.file)?;
    let import = import_legacy_products(&products, range, epoch);
    print_legacy(&import);

    let documents: Vec<ProductDocument> = import
        .records
        .iter()
        .map(ProductDocument::from_legacy)
        .collect();
    let mut session = Session::new().apply(SessionAction::Queue(QueueAction::Enqueue(documents)));
    let mut store = open_store(settings, &args.store)?;
    let report = session.commit(&mut store).context("write products")?;
    print_commit(&report, session.total_writes, store.path());
    Ok(ExitStatus::from_report(&report))
}

pub fn run_settings(args: &SettingsArgs, settings: &MergeSettings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    if args.save {
        let path = save_settings(settings)?;
        eprintln!("Saved settings to {}", path.display());
    }
    Ok(())
}
