// Error Handling Tests
// Rejected withdrawals, deposits and configuration changes

mod common;

#[cfg(test)]
mod error_handling_tests {
    use crate::common::*;
    use anchor_lang::prelude::Pubkey;
    use tranche_pool::constants::*;
    use tranche_pool::error::*;
    use tranche_pool::state::*;
    use tranche_pool::withdrawal::get_vault_deltas;

    #[test]
    fn test_withdrawal_above_claim() {
        let (pool, investor_a, _) = TestPool::with_two_investors();
        let held = investor_a.shares(ShareClass::Senior);

        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Senior, held, USDC, usd(301), 0);
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        let result = pool
            .snapshot()
            .plan_withdraw_by_lp_token(ShareClass::Senior, held, usd(301), &[0; N_COINS]);
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        // no junior shares at all
        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Junior, 0, USDC, usd(1), 0);
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));
    }

    #[test]
    fn test_lp_withdrawal_slippage() {
        let (pool, investor_a, _) = TestPool::with_two_investors();
        let held = investor_a.shares(ShareClass::Senior);

        // about 33.17 DAI comes out of a 100 USD proportional withdrawal
        let result = pool.snapshot().plan_withdraw_by_lp_token(
            ShareClass::Senior,
            held,
            usd(100),
            &[tokens(34, DAI), 0, 0],
        );
        assert!(matches!(result, Err(PoolError::SlippageExceeded)));

        let plan = pool
            .snapshot()
            .plan_withdraw_by_lp_token(ShareClass::Senior, held, usd(100), &[tokens(33, DAI), 0, 0])
            .unwrap();
        assert!(plan.token_amounts[DAI] >= tokens(33, DAI));
    }

    #[test]
    fn test_single_coin_slippage() {
        let (pool, investor_a, _) = TestPool::with_two_investors();
        let held = investor_a.shares(ShareClass::Senior);

        // the fee takes 0.5 USDT
        let result = pool.snapshot().plan_withdraw_by_stablecoin(
            ShareClass::Senior,
            held,
            USDT,
            usd(100),
            tokens(100, USDT),
        );
        assert!(matches!(result, Err(PoolError::SlippageExceeded)));

        let result = pool.snapshot().plan_withdraw_all_single(
            ShareClass::Senior,
            held,
            USDT,
            tokens(300, USDT),
        );
        assert!(matches!(result, Err(PoolError::SlippageExceeded)));
    }

    #[test]
    fn test_vault_without_liquidity() {
        let (pool, _, investor_b) = TestPool::with_two_investors();
        let held = investor_b.shares(ShareClass::Senior);

        // the USDT vault holds 800 USDT
        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Senior, held, USDT, usd(1_000), 0);
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        let result = pool
            .snapshot()
            .plan_withdraw_all_single(ShareClass::Senior, held, DAI, 0);
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));
    }

    #[test]
    fn test_vault_deltas_against_empty_pool() {
        let buoy = par_buoy();
        let result = get_vault_deltas(&buoy, &[0; N_COINS], usd(1));
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        let result = get_vault_deltas(&buoy, &basket(1), usd(4));
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        // an empty vault pays nothing
        let deltas = get_vault_deltas(&buoy, &[tokens(10, DAI), 0, tokens(10, USDT)], usd(10)).unwrap();
        assert_eq!(deltas, [tokens(5, DAI), 0, tokens(5, USDT)]);
    }

    #[test]
    fn test_invalid_token_index() {
        let (pool, investor_a, _) = TestPool::with_two_investors();
        let held = investor_a.shares(ShareClass::Senior);

        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Senior, held, N_COINS, usd(1), 0);
        assert!(matches!(result, Err(PoolError::InvalidTokenIndex)));

        let result = pool
            .snapshot()
            .plan_withdraw_all_single(ShareClass::Senior, held, 7, 0);
        assert!(matches!(result, Err(PoolError::InvalidTokenIndex)));
    }

    #[test]
    fn test_zero_amounts() {
        let (mut pool, mut investor_a, _) = TestPool::with_two_investors();
        let held = investor_a.shares(ShareClass::Senior);

        let result = pool
            .snapshot()
            .plan_withdraw_by_lp_token(ShareClass::Senior, held, 0, &[0; N_COINS]);
        assert!(matches!(result, Err(PoolError::InvalidAmount)));

        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Senior, held, DAI, 0, 0);
        assert!(matches!(result, Err(PoolError::InvalidAmount)));

        let result = pool.deposit(&mut investor_a, ShareClass::Senior, [0; N_COINS]);
        assert!(matches!(result, Err(PoolError::InvalidAmount)));

        // a holder without shares has nothing to withdraw
        let empty = pool.new_depositor();
        let result = pool
            .snapshot()
            .plan_withdraw_all_single(ShareClass::Senior, empty.shares(ShareClass::Senior), DAI, 0);
        assert!(matches!(result, Err(PoolError::InvalidAmount)));
    }

    #[test]
    fn test_config_bounds() {
        let mut controller = Controller::default();
        let result = controller.initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            InitializePoolParams {
                token_decimals: DECIMALS,
                senior_withdrawal_fee: Some(MAX_WITHDRAWAL_FEE + 1),
                ..InitializePoolParams::default()
            },
            0,
            255,
        );
        assert!(matches!(result, Err(PoolError::InvalidConfig)));

        let mut pool = TestPool::new();
        let governance = pool.governance;

        let result = pool
            .controller
            .set_withdrawal_fee(&governance, ShareClass::Junior, MAX_WITHDRAWAL_FEE + 1);
        assert!(matches!(result, Err(PoolError::InvalidConfig)));

        let result = pool.controller.set_big_fish_threshold(&governance, 10_001, 0);
        assert!(matches!(result, Err(PoolError::InvalidConfig)));

        pool.controller
            .set_withdrawal_fee(&governance, ShareClass::Junior, MAX_WITHDRAWAL_FEE)
            .unwrap();
        assert_eq!(pool.controller.withdrawal_fee(ShareClass::Junior), MAX_WITHDRAWAL_FEE);
        assert_eq!(pool.controller.withdrawal_fee(ShareClass::Senior), DEFAULT_WITHDRAWAL_FEE);
    }

    #[test]
    fn test_rejected_config_update_changes_nothing() {
        let mut pool = TestPool::new();
        let governance = pool.governance;
        let before = pool.controller.clone();

        let result = pool.controller.update_config(
            &governance,
            UpdatePoolConfigParams {
                senior_withdrawal_fee: Some(10),
                big_fish_threshold: Some(20_000),
                utilisation_ratio_limit: Some(5_000),
                ..UpdatePoolConfigParams::default()
            },
        );
        assert!(matches!(result, Err(PoolError::InvalidConfig)));
        assert_eq!(pool.controller.senior_withdrawal_fee, before.senior_withdrawal_fee);
        assert_eq!(pool.controller.utilisation_ratio_limit, before.utilisation_ratio_limit);

        pool.controller
            .update_config(
                &governance,
                UpdatePoolConfigParams {
                    senior_withdrawal_fee: Some(10),
                    big_fish_usd_threshold: Some(usd(50_000)),
                    ..UpdatePoolConfigParams::default()
                },
            )
            .unwrap();
        assert_eq!(pool.controller.senior_withdrawal_fee, 10);
        assert_eq!(pool.controller.junior_withdrawal_fee, DEFAULT_WITHDRAWAL_FEE);
        assert_eq!(pool.controller.big_fish_usd_threshold, usd(50_000));
    }

    #[test]
    fn test_whitelist_limits() {
        let mut pool = TestPool::new();
        let governance = pool.governance;

        // the keeper already holds one slot
        for _ in 1..MAX_WHITELIST {
            pool.controller
                .add_to_whitelist(&governance, Pubkey::new_unique())
                .unwrap();
        }
        let result = pool.controller.add_to_whitelist(&governance, Pubkey::new_unique());
        assert!(matches!(result, Err(PoolError::WhitelistFull)));

        // re-adding a member is a no-op
        let keeper = pool.keeper;
        pool.controller.add_to_whitelist(&governance, keeper).unwrap();
        assert_eq!(pool.controller.roles.members().len(), MAX_WHITELIST);

        pool.controller.remove_from_whitelist(&governance, &keeper).unwrap();
        assert!(!pool.controller.roles.is_whitelisted(&keeper));
        assert_eq!(pool.controller.roles.members().len(), MAX_WHITELIST - 1);

        let result = pool.controller.remove_from_whitelist(&governance, &keeper);
        assert!(matches!(result, Err(PoolError::InvalidConfig)));

        let result = pool.controller.add_to_whitelist(&governance, Pubkey::default());
        assert!(matches!(result, Err(PoolError::InvalidConfig)));
    }

    #[test]
    fn test_junior_deposits_respect_utilisation() {
        let (mut pool, _, _) = TestPool::with_two_investors();
        let governance = pool.governance;
        pool.controller.set_utilisation_ratio_limit(&governance, 5_000).unwrap();

        // 1200 junior against 2400 senior sits exactly at the limit
        let mut junior = pool.new_depositor();
        pool.deposit(&mut junior, ShareClass::Junior, basket(400)).unwrap();

        let result = pool.deposit(&mut junior, ShareClass::Junior, basket(1));
        assert!(matches!(result, Err(PoolError::UtilisationLimitExceeded)));
        assert_eq!(pool.ledger.junior.last_assets, usd(1_200));

        // senior deposits lower the ratio and are never limited
        let mut senior = pool.new_depositor();
        pool.deposit(&mut senior, ShareClass::Senior, basket(100)).unwrap();
        pool.deposit(&mut junior, ShareClass::Junior, basket(1)).unwrap();
    }

    #[test]
    fn test_senior_withdrawals_respect_utilisation() {
        let (mut pool, investor_a, _) = TestPool::with_two_investors();
        let mut junior = pool.new_depositor();
        pool.deposit(&mut junior, ShareClass::Junior, basket(400)).unwrap();

        let governance = pool.governance;
        pool.controller.set_utilisation_ratio_limit(&governance, 5_000).unwrap();

        let held = investor_a.shares(ShareClass::Senior);
        let result = pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Senior, held, DAI, usd(100), 0);
        assert!(matches!(result, Err(PoolError::UtilisationLimitExceeded)));

        // junior holders can always leave
        let junior_held = junior.shares(ShareClass::Junior);
        assert!(pool
            .snapshot()
            .plan_withdraw_by_stablecoin(ShareClass::Junior, junior_held, DAI, usd(100), 0)
            .is_ok());
    }

    #[test]
    fn test_junior_deposit_without_senior_cover() {
        let mut pool = TestPool::with_params(InitializePoolParams {
            token_decimals: DECIMALS,
            utilisation_ratio_limit: Some(5_000),
            ..InitializePoolParams::default()
        });
        let mut junior = pool.new_depositor();
        let result = pool.deposit(&mut junior, ShareClass::Junior, basket(1));
        assert!(matches!(result, Err(PoolError::UtilisationLimitExceeded)));

        // with the limit disabled the same deposit goes through
        let governance = pool.governance;
        pool.controller.set_utilisation_ratio_limit(&governance, 0).unwrap();
        pool.deposit(&mut junior, ShareClass::Junior, basket(1)).unwrap();
        assert_eq!(pool.ledger.junior.last_assets, usd(3));
    }

    #[test]
    fn test_vault_adaptor_registration() {
        let mut pool = TestPool::new();
        let governance = pool.governance;
        let adaptor = Pubkey::new_unique();

        let result = pool.controller.register_vault_adaptor(&governance, N_COINS as u8, adaptor);
        assert!(matches!(result, Err(PoolError::InvalidTokenIndex)));

        pool.controller.register_vault_adaptor(&governance, 1, adaptor).unwrap();
        assert_eq!(pool.controller.vault_adaptors[1], adaptor);

        let result = pool
            .controller
            .register_vault_adaptor(&governance, 1, Pubkey::new_unique());
        assert!(matches!(result, Err(PoolError::InvalidConfig)));
    }

    #[test]
    fn test_ledger_rejects_oversized_withdrawal() {
        let mut ledger = seeded_ledger(usd(100), usd(50));
        let result = ledger.record_withdrawal(ShareClass::Junior, usd(10), usd(151));
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        let result = ledger.record_withdrawal(ShareClass::Junior, usd(10), usd(60));
        assert!(matches!(result, Err(PoolError::InsufficientBalance)));

        let result = ledger.record_deposit(ShareClass::Senior, 0, 0);
        assert!(matches!(result, Err(PoolError::InvalidAmount)));
    }
}
