//! Typed record loaders for the two analysis inputs.

use std::path::Path;

use tracing::debug;

use crate::conf::{
    C_COL_COMMENTS, C_COL_CONTENT_CATEGORY, C_COL_DATE, C_COL_ENGAGEMENT_RATE, C_COL_FOLLOWERS,
    C_COL_FORMAT, C_COL_INSTITUTION, C_COL_LIKES, C_COL_PLATFORM, C_COL_POSTS_THIS_WEEK,
    C_COL_PRODUCTION_QUALITY, C_COL_SHARES, C_COL_TONE, C_COL_VIDEO_PERCENTAGE, C_DATE_FORMAT,
    TUP_COLS_CONTENT_CODING, TUP_COLS_INSTAGRAM_METRICS,
};
use crate::reader::read_csv_table;
use crate::spec::{ContentCodingRecord, InstagramMetricRecord, TableError};
use crate::util::{
    extract_date_column, extract_f64_column, extract_str_column, extract_u64_column,
};

/// Load the coded content sample, one record per post.
pub fn load_content_coding(path: &Path) -> Result<Vec<ContentCodingRecord>, TableError> {
    let df = read_csv_table(path, &TUP_COLS_CONTENT_CODING)?;

    let l_institution = extract_str_column(&df, C_COL_INSTITUTION)?;
    let l_category = extract_str_column(&df, C_COL_CONTENT_CATEGORY)?;
    let l_tone = extract_str_column(&df, C_COL_TONE)?;
    let l_format = extract_str_column(&df, C_COL_FORMAT)?;
    let l_engagement = extract_f64_column(&df, C_COL_ENGAGEMENT_RATE)?;
    let l_quality = extract_f64_column(&df, C_COL_PRODUCTION_QUALITY)?;
    let l_likes = extract_u64_column(&df, C_COL_LIKES)?;
    let l_comments = extract_u64_column(&df, C_COL_COMMENTS)?;
    let l_shares = extract_u64_column(&df, C_COL_SHARES)?;
    let l_platform = extract_str_column(&df, C_COL_PLATFORM)?;

    let l_records: Vec<ContentCodingRecord> = (0..df.height())
        .map(|n_row| ContentCodingRecord {
            institution: l_institution[n_row].clone(),
            content_category: l_category[n_row].clone(),
            tone: l_tone[n_row].clone(),
            format: l_format[n_row].clone(),
            engagement_rate: l_engagement[n_row],
            production_quality: l_quality[n_row],
            likes: l_likes[n_row],
            comments: l_comments[n_row],
            shares: l_shares[n_row],
            platform: l_platform[n_row].clone(),
        })
        .collect();

    debug!(n_records = l_records.len(), "content coding records parsed");
    Ok(l_records)
}

/// Load dated Instagram snapshots, one record per institution and date.
pub fn load_instagram_metrics(path: &Path) -> Result<Vec<InstagramMetricRecord>, TableError> {
    let df = read_csv_table(path, &TUP_COLS_INSTAGRAM_METRICS)?;

    let l_institution = extract_str_column(&df, C_COL_INSTITUTION)?;
    let l_date = extract_date_column(&df, C_COL_DATE, C_DATE_FORMAT)?;
    let l_followers = extract_u64_column(&df, C_COL_FOLLOWERS)?;
    let l_engagement = extract_f64_column(&df, C_COL_ENGAGEMENT_RATE)?;
    let l_video = extract_f64_column(&df, C_COL_VIDEO_PERCENTAGE)?;
    let l_posts = extract_f64_column(&df, C_COL_POSTS_THIS_WEEK)?;

    let l_records: Vec<InstagramMetricRecord> = (0..df.height())
        .map(|n_row| InstagramMetricRecord {
            institution: l_institution[n_row].clone(),
            date: l_date[n_row],
            followers: l_followers[n_row],
            engagement_rate: l_engagement[n_row],
            video_percentage: l_video[n_row],
            posts_this_week: l_posts[n_row],
        })
        .collect();

    debug!(n_records = l_records.len(), "instagram metric records parsed");
    Ok(l_records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn load_instagram_metrics_parses_typed_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("instagram_metrics.csv");
        std::fs::write(
            &path,
            "Institution,Date,Followers,Engagement_Rate,Video_Percentage,Posts_This_Week\n\
             YU,2025-01-31,12000,1.8,35,2.5\n\
             NYU,2025-01-31,98000,3.2,65,5\n",
        )
        .expect("write");

        let l_records = load_instagram_metrics(&path).expect("load");
        assert_eq!(l_records.len(), 2);
        assert_eq!(l_records[0].institution, "YU");
        assert_eq!(
            l_records[0].date,
            NaiveDate::from_ymd_opt(2025, 1, 31).expect("date")
        );
        assert_eq!(l_records[1].followers, 98_000);
        assert_eq!(l_records[1].video_percentage, 65.0);
        assert_eq!(l_records[0].posts_this_week, 2.5);
    }

    #[test]
    fn load_content_coding_rejects_unparseable_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("content_coding_data.csv");
        std::fs::write(
            &path,
            "Institution,Content_Category,Tone,Format,Engagement_Rate,Production_Quality,Likes,Comments,Shares,Platform\n\
             YU,Academic,Formal,Photo,1.5,7,120,4,2,Instagram\n\
             NYU,Student Life,Playful,Reel,4.1,9,many,30,12,TikTok\n",
        )
        .expect("write");

        assert!(matches!(
            load_content_coding(&path),
            Err(TableError::InvalidCell { column, row: 1 }) if column == "Likes"
        ));
    }

    #[test]
    fn load_content_coding_reads_all_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("content_coding_data.csv");
        std::fs::write(
            &path,
            "Platform,Institution,Content_Category,Tone,Format,Engagement_Rate,Production_Quality,Likes,Comments,Shares\n\
             Instagram,YU,Academic,Formal,Photo,1.5,7,120,4,2\n",
        )
        .expect("write");

        let l_records = load_content_coding(&path).expect("load");
        assert_eq!(
            l_records,
            vec![ContentCodingRecord {
                institution: "YU".to_string(),
                content_category: "Academic".to_string(),
                tone: "Formal".to_string(),
                format: "Photo".to_string(),
                engagement_rate: 1.5,
                production_quality: 7.0,
                likes: 120,
                comments: 4,
                shares: 2,
                platform: "Instagram".to_string(),
            }]
        );
    }
}
