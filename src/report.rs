// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Human-readable progress output.
//!
//! The report goes to stdout and is meant for people, not parsers. Diagnostics
//! go through `tracing` to stderr.

use std::io::{self, Write};

use crate::balance::BalanceCheck;
use crate::blockchain::{Chain, NetworkConfig};

/// Explorer link for a transaction: `{explorer}/{c|p}-chain/tx/{hash}`.
pub fn explorer_tx_url(network: &NetworkConfig, chain: Chain, tx_hash: &str) -> String {
    format!(
        "{}/{}/tx/{}",
        network.explorer_url.trim_end_matches('/'),
        chain.explorer_segment(),
        tx_hash
    )
}

/// Writes progress lines to any sink.
///
/// Write failures are ignored: a closed stdout must not abort a transfer that
/// has already issued transactions.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    pub fn address(&mut self, chain: Chain, address: &str) {
        self.line(format!("   {chain}-Chain: {address}"));
    }

    pub fn balance(&mut self, chain: Chain, check: &BalanceCheck) {
        match check {
            BalanceCheck::Observed(amount) => {
                self.line(format!("{chain}-Chain balance: {} AVAX", amount.fixed6()))
            }
            BalanceCheck::Unavailable { .. } => self.line(format!(
                "{chain}-Chain balance: unavailable, assuming 0.000000 AVAX"
            )),
        }
    }

    pub fn step(&mut self, index: usize, total: usize, text: &str) {
        self.line(format!("Step {index}/{total}: {text}"));
    }

    pub fn tx_link(&mut self, network: &NetworkConfig, chain: Chain, tx_hash: &str) {
        self.line(format!("   Transaction ID: {tx_hash}"));
        self.line(format!(
            "   View transaction: {}",
            explorer_tx_url(network, chain, tx_hash)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{Amount, AVAX_FUJI, AVAX_MAINNET};

    #[test]
    fn explorer_urls_per_network_and_chain() {
        assert_eq!(
            explorer_tx_url(&AVAX_FUJI, Chain::C, "0xabc"),
            "https://subnets-test.avax.network/c-chain/tx/0xabc"
        );
        assert_eq!(
            explorer_tx_url(&AVAX_MAINNET, Chain::P, "2abc"),
            "https://subnets.avax.network/p-chain/tx/2abc"
        );
    }

    #[test]
    fn reporter_writes_balance_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.balance(
            Chain::C,
            &BalanceCheck::Observed(Amount::from_nano_avax(1_500_000_000)),
        );
        reporter.balance(
            Chain::P,
            &BalanceCheck::Unavailable {
                reason: "timeout".to_string(),
            },
        );
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "C-Chain balance: 1.500000 AVAX\nP-Chain balance: unavailable, assuming 0.000000 AVAX\n"
        );
    }
}
