// src/runner.rs
use crate::{
    config::WidgetOptions,
    core::net,
    prices::{trace, PriceTable},
};

/// What the frontends need after the one-shot startup.
pub struct Startup {
    pub table: PriceTable,
    /// Set when nothing usable was loaded; shown to the user once.
    pub warning: Option<String>,
    pub fetched: bool,
}

/// Fetch (best-effort, if enabled), then load the local price file.
/// Never fails: problems end up in `warning` and the debug log.
pub fn startup(opts: &WidgetOptions) -> Startup {
    let fetched = opts.net.fetch_on_start
        && net::fetch(&opts.net.remote_url, &opts.prices.path, opts.net.timeout());
    if opts.net.fetch_on_start && !fetched {
        logf!("Startup: fetch failed, falling back to local {}", opts.prices.path.display());
    }

    let table = load(opts);
    let warning = table.is_empty().then(|| format!(
        "Could not load prices from {}.\nCheck that the file exists and has valid data.",
        opts.prices.path.display()
    ));

    Startup { table, warning, fetched }
}

/// Load (or reload) the table from the configured path and trace target.
pub fn load(opts: &WidgetOptions) -> PriceTable {
    let mut table = PriceTable::new();
    let mut sink = trace::open(opts.prices.trace_path.as_deref());
    table.load_with_sink(&opts.prices.path, &opts.prices.products, sink.as_mut());
    table
}
