//! Snapshot replay tests
//!
//! Each test writes snapshots to a temporary store, seeds a
//! `solana-program-test` bank with them and checks what the bank serves back.
//! Program calls go to programs that are not loaded in the bank, so they are
//! expected to be rejected; the tests check that a rejection is reported and
//! that later steps still run.

use account_snapshot::{AccountSnapshot, SnapshotError, SnapshotStore};
use futarchy_client::{
    amm_address, amm_lp_mint_address, create_amm, swap_instruction, CreateAmmParams,
    MeteoraSwapAccounts, SwapArgs, METEORA_POOLS_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use futarchy_fetcher::AccountEntry;
use futarchy_integration_tests::*;
use solana_sdk::{pubkey::Pubkey, signature::Signer};
use tempfile::tempdir;

fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

fn pool_snapshot() -> AccountSnapshot {
    AccountSnapshot {
        data: (0u8..=255).cycle().take(944).collect(),
        executable: false,
        owner: METEORA_POOLS_PROGRAM_ID,
        rent_epoch: u64::MAX,
        lamports: 7_461_120,
    }
}

fn vault_snapshot() -> AccountSnapshot {
    AccountSnapshot {
        data: vec![3; 1_227],
        executable: false,
        owner: Pubkey::new_unique(),
        rent_epoch: u64::MAX,
        lamports: 9_431_040,
    }
}

fn swap_accounts(pool: Pubkey, a_vault: Pubkey, user: Pubkey) -> MeteoraSwapAccounts {
    MeteoraSwapAccounts {
        pool,
        user_source_token: Pubkey::new_unique(),
        user_destination_token: Pubkey::new_unique(),
        a_vault,
        b_vault: Pubkey::new_unique(),
        a_token_vault: Pubkey::new_unique(),
        b_token_vault: Pubkey::new_unique(),
        a_vault_lp_mint: Pubkey::new_unique(),
        b_vault_lp_mint: Pubkey::new_unique(),
        a_vault_lp: Pubkey::new_unique(),
        b_vault_lp: Pubkey::new_unique(),
        admin_token_fee: Pubkey::new_unique(),
        user,
        vault_program: Pubkey::new_unique(),
        token_program: TOKEN_PROGRAM_ID,
    }
}

#[tokio::test]
async fn test_replayed_accounts_match_snapshots() {
    init_logger();
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let pool = Pubkey::new_unique();
    let vault = Pubkey::new_unique();

    store.save("future-pool", &pool_snapshot()).unwrap();
    store.save("meteora/a_vault", &vault_snapshot()).unwrap();
    let expected_vault = store.load("meteora/a_vault").unwrap();

    let program_test =
        program_test_with_snapshots(&store, &[(pool, "future-pool"), (vault, "meteora/a_vault")])
            .unwrap();
    let (mut banks_client, _payer, _recent_blockhash) = program_test.start().await;

    let pool_account = banks_client.get_account(pool).await.unwrap().unwrap();
    assert_eq!(pool_account.data, pool_snapshot().data);
    assert_eq!(pool_account.owner, METEORA_POOLS_PROGRAM_ID);
    assert_eq!(pool_account.lamports, 7_461_120);
    assert!(!pool_account.executable);

    let vault_account = banks_client.get_account(vault).await.unwrap().unwrap();
    assert_eq!(vault_account.data, expected_vault.data);
    assert_eq!(vault_account.owner, expected_vault.owner);

    println!("✓ Replayed pool {} and vault {}", pool, vault);
}

#[tokio::test]
async fn test_replay_from_config_entries() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let entries = vec![
        AccountEntry {
            name: "pool".to_string(),
            pubkey: Pubkey::new_unique(),
            subfolder: "meteora".to_string(),
            rpc_url: None,
        },
        AccountEntry {
            name: "a_vault".to_string(),
            pubkey: Pubkey::new_unique(),
            subfolder: "meteora".to_string(),
            rpc_url: None,
        },
    ];
    store.save("meteora/pool", &pool_snapshot()).unwrap();
    store.save("meteora/a_vault", &vault_snapshot()).unwrap();

    let program_test = program_test_from_config(&store, &entries).unwrap();
    let (mut banks_client, _payer, _recent_blockhash) = program_test.start().await;

    for entry in &entries {
        let account = banks_client.get_account(entry.pubkey).await.unwrap();
        let expected = store.load(&entry.snapshot_name()).unwrap();
        assert_eq!(account.map(|a| a.data), Some(expected.data), "{}", entry.name);
    }
}

#[tokio::test]
async fn test_missing_snapshot_aborts_setup() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save("future-pool", &pool_snapshot()).unwrap();
    std::fs::remove_file(store.payload_path("future-pool")).unwrap();

    let err = program_test_with_snapshots(&store, &[(Pubkey::new_unique(), "future-pool")])
        .err()
        .expect("setup should fail");

    assert!(matches!(
        err.downcast_ref::<SnapshotError>(),
        Some(SnapshotError::NotFound { .. })
    ));
}

/// Rejected program calls are logged and the test moves on
#[tokio::test]
async fn test_rejected_calls_do_not_stop_the_run() {
    init_logger();
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let pool = Pubkey::new_unique();
    let vault = Pubkey::new_unique();
    store.save("future-pool", &pool_snapshot()).unwrap();
    store.save("meteora/a_vault", &vault_snapshot()).unwrap();

    let program_test =
        program_test_with_snapshots(&store, &[(pool, "future-pool"), (vault, "meteora/a_vault")])
            .unwrap();
    let (mut banks_client, payer, _recent_blockhash) = program_test.start().await;

    // Step 1: swap on the replayed pool; Meteora is not loaded
    let swap = swap_instruction(
        &METEORA_POOLS_PROGRAM_ID,
        &swap_accounts(pool, vault, payer.pubkey()),
        SwapArgs {
            in_amount: 1_000_000,
            minimum_out_amount: 900_000,
        },
    )
    .unwrap();
    let swap_result = send_logged(&mut banks_client, &payer, &[swap], "meteora swap").await;
    match &swap_result {
        Err(e) => println!("✓ meteora swap rejected: {}", e),
        Ok(()) => panic!("swap against an unloaded program should fail"),
    }

    // Step 2: pool creation on an AMM program that is not deployed
    let amm_program = Pubkey::new_unique();
    let call = create_amm(
        &amm_program,
        &payer.pubkey(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        CreateAmmParams {
            twap_initial_observation: 1_000,
            twap_max_observation_change_per_update: 50,
            proposal: Pubkey::new_unique(),
        },
    )
    .unwrap();
    let create_result = send_logged(
        &mut banks_client,
        &payer,
        &[call.instruction().unwrap()],
        "create amm",
    )
    .await;
    match &create_result {
        Err(e) => println!("✓ create amm rejected: {}", e),
        Ok(()) => panic!("create amm against an undeployed program should fail"),
    }

    // Step 3: replayed state is untouched by the rejected calls
    let pool_account = banks_client.get_account(pool).await.unwrap().unwrap();
    assert_eq!(pool_account.data, pool_snapshot().data);
    assert!(banks_client.get_account(call.amm).await.unwrap().is_none());

    println!("✓ Rejected calls logged, replayed state intact");
}

/// Pool address and LP mint in the built instruction match local derivation
#[tokio::test]
async fn test_create_amm_instruction_targets_derived_accounts() {
    let program_test = program_test_with_snapshots(&SnapshotStore::default(), &[]).unwrap();
    let (mut banks_client, payer, _recent_blockhash) = program_test.start().await;

    let program_id = Pubkey::new_unique();
    let base_mint = Pubkey::new_unique();
    let quote_mint = Pubkey::new_unique();
    let proposal = Pubkey::new_unique();

    let call = create_amm(
        &program_id,
        &payer.pubkey(),
        &base_mint,
        &quote_mint,
        CreateAmmParams {
            twap_initial_observation: 1_000,
            twap_max_observation_change_per_update: 50,
            proposal,
        },
    )
    .unwrap();
    let ix = call.instruction().unwrap();

    let (amm, _) = amm_address(&program_id, &base_mint, &quote_mint, &proposal).unwrap();
    let (lp_mint, _) = amm_lp_mint_address(&program_id, &amm).unwrap();
    assert_eq!(ix.accounts[1].pubkey, amm);
    assert_eq!(ix.accounts[2].pubkey, lp_mint);

    // None of the derived accounts exist before the pool is created
    for address in [amm, lp_mint, call.vault_ata_base, call.vault_ata_quote] {
        assert!(banks_client.get_account(address).await.unwrap().is_none());
    }
}
