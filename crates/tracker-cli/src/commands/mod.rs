//! Command implementations for tracker-cli

pub mod activity;
pub mod client;
pub mod config;
pub mod note;
pub mod project;
pub mod remote;

pub use activity::{run_activity_add, run_activity_delete};
pub use client::{run_client_add, run_client_delete, run_client_list, run_client_show, run_client_update};
pub use config::{run_config_set, run_config_show};
pub use note::{run_note_add, run_note_delete};
pub use project::{
    run_project_add, run_project_delete, run_project_list, run_project_show, run_project_status,
};
pub use remote::{run_load, run_probe, run_seed};

use serde::Serialize;

use crate::error::Result;

/// Amount with thousands separators, e.g. `5,000,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
