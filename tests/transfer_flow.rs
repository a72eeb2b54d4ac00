// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

mod common;

use common::{account, lookup, transfer_config, CallLog, FakeBalances, FakeWallet};
use relational_xchain::blockchain::Chain;
use relational_xchain::config::{ConfigError, TransferConfig};
use relational_xchain::report::Reporter;
use relational_xchain::transfer::{Direction, TransferError, TransferRunner, TxStage};
use relational_xchain::wallet::WalletError;

const ONE_AVAX_WEI: &str = "1000000000000000000";

fn output(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn missing_private_key_fails_before_any_client_exists() {
    let err = TransferConfig::from_lookup(&lookup(&[("TRANSFER_AMOUNT", "0.5")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("PRIVATE_KEY"));
    assert_eq!(err.to_string(), "PRIVATE_KEY not found in environment variables");
}

#[tokio::test]
async fn c_to_p_runs_export_then_import_in_order() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log.clone()).with_c_wei(ONE_AVAX_WEI);
    let mut reporter = Reporter::new(Vec::new());

    let receipt = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut reporter)
        .await
        .unwrap();

    assert_eq!(receipt.export.tx_hash, "tx-c-export");
    assert_eq!(receipt.export.chain, Chain::C);
    assert_eq!(receipt.import.tx_hash, "tx-p-import");
    assert_eq!(receipt.import.chain, Chain::P);

    assert_eq!(
        log.entries(),
        vec![
            format!("balance:C:{}", account.evm_address()),
            "prepare:c-export".to_string(),
            "send:c-export".to_string(),
            "wait:tx-c-export".to_string(),
            "prepare:p-import".to_string(),
            "send:p-import".to_string(),
            "wait:tx-p-import".to_string(),
        ]
    );

    let out = output(reporter);
    assert!(out.contains("https://subnets-test.avax.network/c-chain/tx/tx-c-export"));
    assert!(out.contains("https://subnets-test.avax.network/p-chain/tx/tx-p-import"));
    assert!(out.contains("C-Chain balance: 1.000000 AVAX"));
}

#[tokio::test]
async fn c_to_p_requests_target_the_account_addresses() {
    let config = transfer_config("0.25");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log).with_c_wei(ONE_AVAX_WEI);

    TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut Reporter::new(Vec::new()))
        .await
        .unwrap();

    let requests = wallet.requests.lock().unwrap();
    let export = &requests[0];
    assert_eq!(export["destinationChain"], "P");
    assert_eq!(export["fromAddress"], account.evm_address());
    assert_eq!(export["exportedOutput"]["addresses"][0], account.p_chain_address());
    assert_eq!(export["exportedOutput"]["amountNanoAvax"], 250_000_000u64);

    let import = &requests[1];
    assert_eq!(import["sourceChain"], "C");
    assert_eq!(import["importedOutput"]["addresses"][0], account.p_chain_address());
}

#[tokio::test]
async fn p_to_c_gates_on_p_chain_and_imports_to_evm_address() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log.clone()).with_p("2");
    let mut reporter = Reporter::new(Vec::new());

    let receipt = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::PToC, &mut reporter)
        .await
        .unwrap();

    assert_eq!(receipt.export.tx_hash, "tx-p-export");
    assert_eq!(receipt.import.tx_hash, "tx-c-import");
    assert_eq!(
        log.entries(),
        vec![
            format!("balance:P:{}", account.p_chain_address()),
            "prepare:p-export".to_string(),
            "send:p-export".to_string(),
            "wait:tx-p-export".to_string(),
            "prepare:c-import".to_string(),
            "send:c-import".to_string(),
            "wait:tx-c-import".to_string(),
        ]
    );

    let requests = wallet.requests.lock().unwrap();
    assert_eq!(requests[0]["exportedOutputs"][0]["amountNanoAvax"], 1_000_000u64);
    assert_eq!(requests[1]["toAddress"], account.evm_address());

    let out = output(reporter);
    assert!(out.contains("https://subnets-test.avax.network/p-chain/tx/tx-p-export"));
    assert!(out.contains("https://subnets-test.avax.network/c-chain/tx/tx-c-import"));
}

#[tokio::test]
async fn zero_balance_stops_before_any_wallet_call() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log.clone()).with_c_wei("0");

    let err = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut Reporter::new(Vec::new()))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Insufficient C-Chain balance. Have: 0.000000 AVAX, Need: 0.001100 AVAX (0.001 + 0.0001 for fees)"
    );
    assert_eq!(log.entries(), vec![format!("balance:C:{}", account.evm_address())]);
}

#[tokio::test]
async fn balance_equal_to_amount_is_not_enough() {
    // 10^15 wei is exactly 0.001 AVAX, short of the 0.0001 fee buffer.
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log.clone()).with_c_wei("1000000000000000");

    let err = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut Reporter::new(Vec::new()))
        .await
        .unwrap_err();

    match err {
        TransferError::InsufficientBalance(e) => {
            assert_eq!(e.have.fixed6(), "0.001000");
            assert_eq!(e.need.fixed6(), "0.001100");
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
    assert!(!log.entries().iter().any(|e| e.starts_with("prepare:")));
}

#[tokio::test]
async fn failed_balance_query_is_treated_as_zero() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::new(log.clone());
    let balances = FakeBalances::new(log.clone()).failing(Chain::C, "connection refused");
    let mut reporter = Reporter::new(Vec::new());

    let err = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut reporter)
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InsufficientBalance(_)));
    assert!(err.to_string().contains("Have: 0.000000 AVAX"));
    assert_eq!(log.entries().len(), 1);
    assert!(output(reporter).contains("C-Chain balance: unavailable"));
}

#[tokio::test]
async fn import_failure_keeps_reported_export_and_stops() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::failing_on(log.clone(), "send:p-import");
    let balances = FakeBalances::new(log.clone()).with_c_wei(ONE_AVAX_WEI);
    let mut reporter = Reporter::new(Vec::new());

    let err = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut reporter)
        .await
        .unwrap_err();

    match &err {
        TransferError::Import {
            export,
            stage,
            source,
        } => {
            assert_eq!(export.tx_hash, "tx-c-export");
            assert_eq!(*stage, TxStage::Send);
            assert!(matches!(source, WalletError::Signing(_)));
        }
        other => panic!("expected Import error, got {other:?}"),
    }
    assert!(err.to_string().contains("export tx-c-export is accepted"));

    let entries = log.entries();
    assert_eq!(entries.last().map(String::as_str), Some("send:p-import"));
    assert!(!entries.iter().any(|e| e == "wait:tx-p-import"));

    let out = output(reporter);
    assert!(out.contains("https://subnets-test.avax.network/c-chain/tx/tx-c-export"));
    assert!(!out.contains("p-chain/tx/"));
}

#[tokio::test]
async fn export_confirmation_failure_never_prepares_import() {
    let config = transfer_config("0.001");
    let account = account(&config);
    let log = CallLog::default();
    let wallet = FakeWallet::failing_on(log.clone(), "wait:tx-c-export");
    let balances = FakeBalances::new(log.clone()).with_c_wei(ONE_AVAX_WEI);

    let err = TransferRunner::new(&config, &account, &wallet, &balances)
        .run(Direction::CToP, &mut Reporter::new(Vec::new()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::Export {
            stage: TxStage::Confirm,
            ..
        }
    ));
    assert!(!log.entries().iter().any(|e| e == "prepare:p-import"));
}
