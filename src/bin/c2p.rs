// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Move AVAX from the C-Chain to the P-Chain.

use std::process::ExitCode;

use relational_xchain::app;
use relational_xchain::report::Reporter;
use relational_xchain::transfer::Direction;

#[tokio::main]
async fn main() -> ExitCode {
    app::bootstrap();
    let mut reporter = Reporter::stdout();
    app::exit_code(app::run_transfer(Direction::CToP, &mut reporter).await)
}
