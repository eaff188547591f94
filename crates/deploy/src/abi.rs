//! Solidity bindings for the parent-chain contracts used during deployment.

use alloy_sol_types::sol;

sol! {
    #![sol(all_derives)]

    /// Bounds on how far sequencer-inbox messages may drift from the parent chain.
    struct MaxTimeVariation {
        uint256 delayBlocks;
        uint256 futureBlocks;
        uint256 delaySeconds;
        uint256 futureSeconds;
    }

    /// Rollup configuration as consumed by `RollupCreator.createRollup`.
    struct Config {
        uint64 confirmPeriodBlocks;
        uint64 extraChallengeTimeBlocks;
        address stakeToken;
        uint256 baseStake;
        bytes32 wasmModuleRoot;
        address owner;
        address loserStakeEscrow;
        uint256 chainId;
        string chainConfig;
        uint64 genesisBlockNum;
        MaxTimeVariation sequencerInboxMaxTimeVariation;
    }

    struct RollupDeploymentParams {
        Config config;
        address batchPoster;
        address[] validators;
        uint256 maxDataSize;
        address nativeToken;
        bool deployFactoriesToL2;
        uint256 maxFeePerGasForRetryables;
    }

    interface IRollupCreator {
        event RollupCreated(
            address indexed rollupAddress,
            address indexed nativeToken,
            address inboxAddress,
            address outbox,
            address rollupEventInbox,
            address challengeManager,
            address adminProxy,
            address sequencerInbox,
            address bridge,
            address upgradeExecutor,
            address validatorUtils,
            address validatorWalletCreator
        );

        function createRollup(RollupDeploymentParams memory deployParams) external payable returns (address);
    }

    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}
