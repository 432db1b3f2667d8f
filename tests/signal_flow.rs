use indexfolio::application::signals::{
    IndicatorAnalyzer, SecuritySignals, SignalAggregator, SignalBoard,
};
use indexfolio::application::signals::signal_aggregator::CONFLICTING_SIGNALS;
use indexfolio::domain::market::Candle;
use indexfolio::domain::signals::{
    Action, IndicatorBundle, IndicatorKey, IndicatorReading, IndicatorStatus, SignalPolicy,
    StatusTag, Strength, VoteTally, VoteWeights,
};
use rust_decimal::Decimal;

fn create_candle(i: usize, price: f64) -> Candle {
    Candle {
        symbol: "TEST".to_string(),
        open: Decimal::from_f64_retain(price).unwrap(),
        high: Decimal::from_f64_retain(price + 1.0).unwrap(),
        low: Decimal::from_f64_retain(price - 1.0).unwrap(),
        close: Decimal::from_f64_retain(price).unwrap(),
        volume: Decimal::new(1000, 0),
        timestamp: i as i64,
    }
}

fn trend(start: f64, step: f64, n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| create_candle(i, start + step * i as f64))
        .collect()
}

fn reading(key: IndicatorKey, action: Action) -> IndicatorReading {
    IndicatorReading::new(key, 0.0, action, "test")
}

#[test]
fn test_uptrend_candles_vote_strong_buy() {
    let analyzer = IndicatorAnalyzer::default();
    let bundle = analyzer.analyze(&trend(100.0, 2.0, 60)).unwrap();

    // RSI overbought (sell), MACD bullish and price above EMA (buy), BB middle
    let vote = SignalAggregator::default().summarize_bundle(&bundle);

    assert_eq!(
        vote.tally,
        VoteTally {
            buy: 3,
            sell: 2,
            neutral: 1
        }
    );
    assert_eq!(vote.status, StatusTag::BuyStrong);
    assert_eq!(vote.label(), "Buy (strong)");
}

#[test]
fn test_downtrend_candles_vote_strong_sell() {
    let bundle = IndicatorAnalyzer::default()
        .analyze(&trend(300.0, -2.0, 60))
        .unwrap();

    let vote = SignalAggregator::default().summarize_bundle(&bundle);

    assert_eq!(vote.action, Action::Sell);
    assert_eq!(vote.strength, Some(Strength::Strong));
}

#[test]
fn test_short_history_is_neutral() {
    let bundle = IndicatorAnalyzer::default()
        .analyze(&trend(100.0, 1.0, 10))
        .unwrap();
    assert!(bundle.is_empty());

    let vote = SignalAggregator::default().summarize_bundle(&bundle);
    assert_eq!(vote.action, Action::Neutral);
    assert_eq!(vote.strength, None);
    assert_eq!(vote.description, CONFLICTING_SIGNALS);
}

#[test]
fn test_equal_weight_disagreement_is_neutral() {
    let bundle = IndicatorBundle::new()
        .with(reading(IndicatorKey::Rsi, Action::Buy))
        .with(reading(IndicatorKey::Macd, Action::Sell))
        .with(IndicatorReading::new(IndicatorKey::Adx, 40.0, Action::Neutral, "adx"));

    let vote = SignalAggregator::default().summarize_bundle(&bundle);

    assert_eq!(vote.status, StatusTag::Neutral);
    assert_eq!(vote.tally.buy, vote.tally.sell);
}

#[test]
fn test_custom_policy_changes_outcome() {
    let readings = IndicatorBundle::new()
        .with(reading(IndicatorKey::Rsi, Action::Buy))
        .with(reading(IndicatorKey::Ema, Action::Sell))
        .with(reading(IndicatorKey::Bb, Action::Sell));

    let default_vote = SignalAggregator::default().summarize_bundle(&readings);
    assert_eq!(default_vote.status, StatusTag::Neutral);

    let policy = SignalPolicy {
        weights: VoteWeights {
            rsi: 1,
            macd: 2,
            bb: 1,
            ema: 1,
        },
        ..SignalPolicy::default()
    };
    let vote = SignalAggregator::new(policy).summarize_bundle(&readings);
    assert_eq!(vote.status, StatusTag::SellWeak);
}

#[test]
fn test_board_over_analyzed_securities() {
    let analyzer = IndicatorAnalyzer::default();
    let securities = vec![
        SecuritySignals {
            security_id: "UP".to_string(),
            weight: 60.0,
            bundle: analyzer.analyze(&trend(100.0, 2.0, 60)).unwrap(),
        },
        SecuritySignals {
            security_id: "DOWN".to_string(),
            weight: 30.0,
            bundle: analyzer.analyze(&trend(300.0, -2.0, 60)).unwrap(),
        },
        SecuritySignals {
            security_id: "NEW".to_string(),
            weight: 10.0,
            bundle: analyzer.analyze(&trend(50.0, 1.0, 5)).unwrap(),
        },
    ];

    let board = SignalBoard::build(&SignalAggregator::default(), &securities);

    let statuses: Vec<StatusTag> = board.by_status.iter().map(|g| g.status).collect();
    assert_eq!(
        statuses,
        vec![StatusTag::BuyStrong, StatusTag::SellStrong, StatusTag::Neutral]
    );

    let ema = board.indicator_groups(IndicatorKey::Ema);
    assert_eq!(ema[0].status, IndicatorStatus::Above);
    assert_eq!(ema[0].members[0].security_id, "UP");
    assert_eq!(ema[1].status, IndicatorStatus::Below);
    assert_eq!(ema[1].members[0].weight, 30.0);
}
