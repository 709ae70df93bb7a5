mod cli;
mod commands;
mod infra;

use credit_sim::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
