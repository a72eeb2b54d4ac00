// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Print the account's C-Chain and P-Chain balances.

use std::process::ExitCode;

use relational_xchain::app;
use relational_xchain::report::Reporter;

#[tokio::main]
async fn main() -> ExitCode {
    app::bootstrap();
    let mut reporter = Reporter::stdout();
    app::exit_code(app::run_balances(&mut reporter).await)
}
