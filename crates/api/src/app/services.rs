use std::sync::Arc;

use bizledger_infra::{AppConfig, InMemoryLedgerStore, Ledger, LedgerError};

/// Shared application services handed to every handler.
#[derive(Debug)]
pub struct AppServices {
    ledger: Ledger<Arc<InMemoryLedgerStore>>,
}

impl AppServices {
    pub fn new(ledger: Ledger<Arc<InMemoryLedgerStore>>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger<Arc<InMemoryLedgerStore>> {
        &self.ledger
    }
}

/// Wire the in-memory store and, when configured, seed the default chart.
pub fn build_services(config: &AppConfig) -> Result<AppServices, LedgerError> {
    let ledger = Ledger::new(Arc::new(InMemoryLedgerStore::new()));

    if config.seed_chart {
        let created = ledger.seed_default_chart()?;
        tracing::info!(accounts = created.len(), "seeded default chart of accounts");
    }

    Ok(AppServices::new(ledger))
}
