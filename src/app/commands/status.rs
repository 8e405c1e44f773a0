//! Status command: report the quality gate for the configured profile.

use log::{info, warn};

use crate::domain::AppError;
use crate::ports::{GateStatus, LocalizationClient};

pub fn execute<C>(client: &C) -> Result<GateStatus, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let gate = client.fetch_gate_status()?;
    if gate.status == 0 {
        info!("Gate result: {} ({})", gate.gate_result, gate.message);
    } else {
        warn!("Gate result: {} ({}), status {}", gate.gate_result, gate.message, gate.status);
    }
    Ok(gate)
}
