//! Input column names and parse formats.

pub const C_COL_INSTITUTION: &str = "Institution";
pub const C_COL_CONTENT_CATEGORY: &str = "Content_Category";
pub const C_COL_TONE: &str = "Tone";
pub const C_COL_FORMAT: &str = "Format";
pub const C_COL_ENGAGEMENT_RATE: &str = "Engagement_Rate";
pub const C_COL_PRODUCTION_QUALITY: &str = "Production_Quality";
pub const C_COL_LIKES: &str = "Likes";
pub const C_COL_COMMENTS: &str = "Comments";
pub const C_COL_SHARES: &str = "Shares";
pub const C_COL_PLATFORM: &str = "Platform";
pub const C_COL_DATE: &str = "Date";
pub const C_COL_FOLLOWERS: &str = "Followers";
pub const C_COL_VIDEO_PERCENTAGE: &str = "Video_Percentage";
pub const C_COL_POSTS_THIS_WEEK: &str = "Posts_This_Week";

/// Required columns of the content coding sheet.
pub const TUP_COLS_CONTENT_CODING: [&str; 10] = [
    C_COL_INSTITUTION,
    C_COL_CONTENT_CATEGORY,
    C_COL_TONE,
    C_COL_FORMAT,
    C_COL_ENGAGEMENT_RATE,
    C_COL_PRODUCTION_QUALITY,
    C_COL_LIKES,
    C_COL_COMMENTS,
    C_COL_SHARES,
    C_COL_PLATFORM,
];

/// Required columns of the Instagram metrics sheet.
pub const TUP_COLS_INSTAGRAM_METRICS: [&str; 6] = [
    C_COL_INSTITUTION,
    C_COL_DATE,
    C_COL_FOLLOWERS,
    C_COL_ENGAGEMENT_RATE,
    C_COL_VIDEO_PERCENTAGE,
    C_COL_POSTS_THIS_WEEK,
];

/// Calendar date cells.
pub const C_DATE_FORMAT: &str = "%Y-%m-%d";
/// Field separator for both input and output.
pub const U8_SEPARATOR: u8 = b',';
