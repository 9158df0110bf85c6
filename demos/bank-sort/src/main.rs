use std::{env, sync::Arc};

use async_trait::async_trait;
use rand::{Rng, seq::SliceRandom};
use tokio::sync::Notify as Signal;
use tracing::info;

use banksort_core::MemoryBank;
use banksort_model::{Entry, SortOrder};
use banksort_observe::{Journal, LoggerConfig, LoggerLevel, logger_init};
use banksort_plugin::{Notify, SortBankItems};

const CAPACITY: usize = 24;

/// Wakes `main` when the sort finishes.
#[derive(Default)]
struct Done(Signal);

#[async_trait]
impl Notify for Done {
    async fn sort_complete(&self) {
        info!("bank sorted");
        self.0.notify_one();
    }

    async fn play_sound(&self) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let level = env::var("BANKSORT_LOG").unwrap_or_else(|_| "info".to_string());
    let cfg = LoggerConfig {
        level: LoggerLevel::new(level)?,
        ..Default::default()
    };
    logger_init(&cfg)?;

    // 2) Order from argv: `id` or `value`
    let order: SortOrder = env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("value")
        .parse()
        .map_err(anyhow::Error::msg)?;

    // 3) Simulated host bank
    let bank = random_bank(CAPACITY);
    info!(capacity = bank.capacity(), slots = ?bank.ids(), "bank before");

    // 4) Plugin
    let done = Arc::new(Done::default());
    let plugin = SortBankItems::builder(Arc::new(bank.clone()))
        .notify(done.clone())
        .subscriber(Arc::new(Journal::new()))
        .build();
    plugin.init();
    plugin.start();
    plugin.bank_opened();

    // 5) Sort and wait
    let run = plugin.sort(order)?;
    info!(%run, %order, "sorting; press Ctrl+C to close the bank");

    tokio::select! {
        _ = done.0.notified() => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            plugin.bank_closed();
        }
    }

    info!(slots = ?bank.ids(), exchanges = bank.exchanges(), "bank after");
    plugin.stop();
    Ok(())
}

fn random_bank(capacity: usize) -> MemoryBank {
    let mut rng = rand::thread_rng();
    let mut ids: Vec<u32> = (1..=500).collect();
    ids.shuffle(&mut rng);

    let slots = ids
        .into_iter()
        .take(capacity)
        .map(|id| {
            if rng.gen_bool(0.2) {
                None
            } else {
                Some(Entry::new(id, rng.gen_range(1..10_000)))
            }
        })
        .collect();
    MemoryBank::from_slots(slots)
}
