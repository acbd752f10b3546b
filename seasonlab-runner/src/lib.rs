//! Seasonlab Runner — event-study orchestration on top of `seasonlab-core`.
//!
//! This crate provides:
//! - The serializable analysis request with validation and content-hash ids
//! - Engine entry points (provider-backed and from pre-loaded data)
//! - Aggregate metrics (win rate, profit factor, Sharpe/Sortino, drawdown)
//! - Equity curve with sequential compounding and drawdown scanning
//! - Pre/event/post segmentation of daily returns
//! - Return distribution analysis (histogram, percentiles, shape, outliers)

pub mod distribution;
pub mod engine;
pub mod equity;
pub mod metrics;
pub mod request;
pub mod segments;

pub use distribution::{
    analyze_distribution, HistogramBin, Outlier, Percentiles, ReturnDistribution,
    HISTOGRAM_BINS, OUTLIER_STD_DEVS,
};
pub use engine::{
    run_analysis, run_analysis_from_data, AnalysisError, AnalysisResult, EventSummary,
    SCHEMA_VERSION,
};
pub use equity::{
    build_equity_curve, max_drawdown, max_drawdown_period, DrawdownPeriod, EquityPoint,
    INITIAL_EQUITY,
};
pub use metrics::{AggregateMetrics, ExtremeTrade, PROFIT_FACTOR_CAP};
pub use request::{
    AnalysisRequest, ConfigError, FilterParams, ResolvedRequest, TradeParams, WindowParams,
    DEFAULT_MIN_OCCURRENCES,
};
pub use segments::{segment_returns, SegmentStats, SegmentedStats};
