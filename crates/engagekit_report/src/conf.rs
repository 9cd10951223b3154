//! Report constants: output names, benchmarks and literal reference figures.

/// Decimals kept in derived report values.
pub const N_DECIMALS_REPORT: u32 = 2;
/// Calendar date cells.
pub const C_DATE_FORMAT: &str = "%Y-%m-%d";

////////////////////////////////////////////////////////////////////////////////
// #region OutputFiles

pub const C_FILE_SIMULATED: &str = "social_media_metrics.xlsx";
pub const C_FILE_REFERENCE_METRICS: &str = "social_media_metrics.xlsx";
pub const C_FILE_REFERENCE_EXECUTIVE: &str = "executive_metrics.xlsx";
pub const C_FILE_METRICS: &str = "instagram_metrics_report.xlsx";
pub const C_FILE_QUALITATIVE: &str = "qualitative_analysis.xlsx";
pub const C_FILE_SUMMARY_STATISTICS: &str = "summary_statistics.csv";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Benchmarks

/// Industry engagement benchmark for Instagram, percent.
pub const F_BENCHMARK_ENGAGEMENT_PCT: f64 = 2.99;
/// Recommended share of video content, percent.
pub const TUP_OPTIMAL_VIDEO_PCT: (f64, f64) = (60.0, 70.0);
/// Recommended posts per week.
pub const TUP_OPTIMAL_POSTS_PER_WEEK: (f64, f64) = (5.0, 6.0);

pub const C_FOCUS_INSTITUTION_DEFAULT: &str = "YU";
pub const TUP_LEADER_INSTITUTIONS_DEFAULT: [&str; 3] = ["NYU", "Columbia", "Maryland"];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReferenceFigures

/// `(institution, followers, posts, market position)`; `None` posts are unpublished.
pub const TUP_INSTAGRAM_PERFORMANCE: [(&str, u64, Option<u64>, &str); 6] = [
    ("NYU", 593_000, Some(2613), "Leader"),
    ("Columbia", 457_000, None, "Premium"),
    ("Rutgers", 124_000, None, "Challenger"),
    ("Brandeis", 25_000, Some(2965), "Closest Peer"),
    ("Yeshiva", 15_000, Some(2260), "Current"),
    ("Maryland*", 4_932, Some(1258), "Admissions Only"),
];
/// Institution the executive summary is written for.
pub const C_REFERENCE_FOCUS_INSTITUTION: &str = "Yeshiva";

/// `(platform, current rate %, benchmark %, impact)`.
pub const TUP_PLATFORM_METRICS: [(&str, f64, f64, &str); 5] = [
    ("Instagram", 1.5, 2.99, "High"),
    ("TikTok", 0.0, 4.80, "Critical"),
    ("LinkedIn", 1.2, 2.95, "Medium"),
    ("Facebook", 0.9, 2.97, "Medium"),
    ("Twitter", 0.8, 2.61, "Low"),
];

/// `(format, engagement %, completion %, growth potential)`.
pub const TUP_CONTENT_FORMATS: [(&str, f64, Option<u64>, &str); 5] = [
    ("Instagram Reels", 1.99, Some(85), "Very High"),
    ("TikTok Videos", 4.80, Some(92), "Critical"),
    ("Static Posts", 0.80, None, "Low"),
    ("Carousel Posts", 1.20, Some(65), "Medium"),
    ("Live Content", 3.50, Some(45), "High"),
];

/// `(initiative, required resources $, timeline days, expected ROI %)`.
pub const TUP_STRATEGIC_INITIATIVES: [(&str, u64, u64, u64); 5] = [
    ("TikTok Launch", 45_000, 90, 285),
    ("Video Production", 75_000, 120, 180),
    ("Team Expansion", 120_000, 60, 150),
    ("Analytics System", 35_000, 45, 125),
    ("Content Strategy", 25_000, 30, 200),
];

/// Executive rows after the two follower rows: `(metric, value, status)`.
pub const TUP_EXECUTIVE_SUMMARY: [(&str, &str, &str); 6] = [
    ("Current Engagement Rate", "1.5%", "Below Benchmark"),
    ("Target Engagement Rate", "3.5%", "Achievable"),
    ("Required Investment", "$300,000", "Required"),
    ("Expected ROI (6 months)", "200%", "High"),
    ("Growth Target (6 months)", "+67%", "Realistic"),
    ("TikTok Growth Potential", "2.28% weekly", "High Priority"),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BrandVoice

/// Coded voice dimensions, scale 1-10. Formality is inverted.
pub const TUP_VOICE_CHARACTERISTICS: [&str; 8] = [
    "Formality (Inverted)",
    "Authenticity",
    "Personality",
    "Relatability",
    "Energy",
    "Humor",
    "Emotional Tone",
    "Consistency",
];

/// Per-institution scores aligned with [`TUP_VOICE_CHARACTERISTICS`].
pub const TUP_VOICE_SCORES: [(&str, [f64; 8]); 4] = [
    ("YU", [2.5, 6.0, 5.5, 5.2, 6.0, 3.5, 6.5, 7.8]),
    ("NYU", [5.8, 8.5, 8.8, 8.6, 9.0, 8.5, 8.2, 8.0]),
    ("Columbia", [4.2, 7.8, 7.5, 7.2, 7.0, 6.5, 7.8, 8.5]),
    ("Maryland", [6.0, 8.2, 8.5, 8.4, 8.8, 8.2, 7.8, 7.5]),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
