use anyhow::{bail, Context, Result};
use clap::Parser;
use listview::api::ListController;
use listview::commands::sort::SortSpec;
use listview::config::{ListViewConfig, PageConfig};
use listview::model::{EntityId, QueryKey};
use listview::permissions::{AllowAll, PermissionOracle, PermissionSet};
use listview::state::Action;
use listview::store::fs::JsonFileStore;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::render;
use super::setup::{Cli, Commands, FilterArgs, Source};

/// Grants loaded from `--permissions`, or everything when absent.
enum Grants {
    All(AllowAll),
    Set(PermissionSet),
}

impl PermissionOracle for Grants {
    fn has_permission(&self, module: &str, feature: &str) -> bool {
        match self {
            Grants::All(all) => all.has_permission(module, feature),
            Grants::Set(set) => set.has_permission(module, feature),
        }
    }
}

type Controller = ListController<JsonFileStore, Grants>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ListViewConfig::load(cli.config.as_deref()).context("failed to load settings")?;
    debug!(?config, "settings loaded");

    match cli.command {
        Commands::List {
            source,
            filters,
            page,
            json,
        } => list(&config, &source, &filters, page, json),
        Commands::Facets { source, facet } => facets(&config, &source, facet.as_deref()),
        Commands::Export { source, filters } => export(&config, &source, &filters),
        Commands::Delete { source, ids } => delete(&config, &source, &ids),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_grants(path: Option<&Path>) -> Result<Grants> {
    let Some(path) = path else {
        return Ok(Grants::All(AllowAll));
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read permissions {}", path.display()))?;
    let set: PermissionSet = serde_json::from_str(&content)
        .with_context(|| format!("invalid permissions file {}", path.display()))?;
    Ok(Grants::Set(set))
}

/// A file `dir/<name>.json` is collection `<name>` of a store rooted at `dir`.
fn resolve_store(data: &Path, page: &PageConfig) -> Result<(JsonFileStore, QueryKey)> {
    if data.is_dir() {
        return Ok((JsonFileStore::new(data), QueryKey::new(page.entity.clone())));
    }
    if !data.is_file() {
        bail!("data not found: {}", data.display());
    }
    if data.extension().and_then(|e| e.to_str()) != Some("json") {
        bail!("data file must have a .json extension: {}", data.display());
    }
    let name = data
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("unusable data file name: {}", data.display()))?;
    let root = data.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((JsonFileStore::new(root), QueryKey::new(name)))
}

fn open(config: &ListViewConfig, source: &Source) -> Result<Controller> {
    let page = PageConfig::from_path(&source.page_config)
        .with_context(|| format!("failed to read page config {}", source.page_config.display()))?;
    let (store, query) = resolve_store(&source.data, &page)?;
    let grants = load_grants(source.permissions.as_deref())?;

    let mut controller = ListController::new(store, grants, page, config).with_query(query);
    controller.refresh().context("failed to load records")?;
    Ok(controller)
}

fn apply_filters(controller: &mut Controller, filters: &FilterArgs) {
    if let Some(search) = &filters.search {
        controller.dispatch(Action::SetSearch(search.clone()));
    }

    let mut by_key: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (key, value) in &filters.facets {
        by_key.entry(key.as_str()).or_default().push(value.clone());
    }
    for (key, values) in by_key {
        controller.dispatch(Action::SetFacet {
            key: key.to_string(),
            values,
        });
    }

    if let Some(sort) = &filters.sort {
        controller.dispatch(Action::SetSort(Some(SortSpec::parse(sort))));
    }
    select(controller, &filters.select);
}

/// Selects `ids`; an id given twice stays selected.
fn select(controller: &mut Controller, ids: &[String]) {
    for id in ids {
        let id = EntityId::from(id.as_str());
        if !controller.state().selected.contains(&id) {
            controller.toggle_select(id);
        }
    }
}

fn list(
    config: &ListViewConfig,
    source: &Source,
    filters: &FilterArgs,
    page: usize,
    json: bool,
) -> Result<()> {
    let mut controller = open(config, source)?;
    apply_filters(&mut controller, filters);
    controller.dispatch(Action::GoToPage(page));

    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let term = filters.search.as_deref().unwrap_or("");
        print!("{}", render::list(&view, controller.page_config(), term));
    }
    Ok(())
}

fn facets(config: &ListViewConfig, source: &Source, only: Option<&str>) -> Result<()> {
    let controller = open(config, source)?;
    let page = controller.page_config();

    let keys: Vec<(String, String)> = match only {
        Some(key) => {
            let label = listview::facets::find_spec(&page.facets, key)
                .map(|spec| spec.display_label().to_string())
                .unwrap_or_else(|| key.to_string());
            vec![(key.to_string(), label)]
        }
        None => page
            .facets
            .iter()
            .map(|spec| (spec.key.clone(), spec.display_label().to_string()))
            .collect(),
    };

    if keys.is_empty() {
        bail!("page '{}' defines no facets", page.entity);
    }
    let blocks: Vec<String> = keys
        .iter()
        .map(|(key, label)| render::facet(label, &controller.facet_options(key)))
        .collect();
    print!("{}", blocks.join("\n"));
    Ok(())
}

fn export(config: &ListViewConfig, source: &Source, filters: &FilterArgs) -> Result<()> {
    let mut controller = open(config, source)?;
    apply_filters(&mut controller, filters);
    let table = controller.export()?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}

fn delete(config: &ListViewConfig, source: &Source, ids: &[String]) -> Result<()> {
    let mut controller = open(config, source)?;
    select(&mut controller, ids);
    let outcome = controller.delete_selected()?;
    println!("{}", render::deleted(&outcome.deleted));
    Ok(())
}
