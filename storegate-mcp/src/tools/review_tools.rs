//! Product review tool for storegate MCP
//!
//! Besides moderation (approve/reject) this tool computes review analytics
//! gateway-side: rating distribution and a coarse sentiment split, both as
//! one-decimal percentages.

use super::schema;
use super::{
    clamp_take, default_take, error_text_response, required, to_pretty_response,
    writes_disabled_response, ToolHandler,
};
use crate::error::{Error, Result};
use crate::gateway::{Domain, ServiceGateway};
use crate::mcp::protocol::{CallToolResult, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use storegate_rpc::contracts::review::{Review, SearchReviewsRequest};
use tracing::debug;

/// Largest review page fetched for the analytics action.
const ANALYTICS_SAMPLE_SIZE: u64 = 200;

/// Tool exposing the product review service.
pub struct ReviewTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct ReviewToolParams {
    action: String,
    review_id: Option<String>,
    product_id: Option<String>,
    store_id: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

/// Analytics over the reviews of one product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewAnalytics {
    product_id: String,
    /// Matching reviews as counted by the backend.
    total_reviews: u64,
    /// Reviews actually fetched and analyzed; the distribution and
    /// sentiment percentages are over this sample.
    sampled_reviews: usize,
    average_rating: f64,
    distribution: Vec<StarBucket>,
    sentiment: SentimentSplit,
}

#[derive(Debug, Serialize)]
struct StarBucket {
    stars: u8,
    count: usize,
    percent: f64,
}

/// Reviews bucketed by tone: 4-5 stars positive, 3 neutral, 1-2 negative.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SentimentSplit {
    positive_percent: f64,
    neutral_percent: f64,
    negative_percent: f64,
}

/// Percentage with one decimal place; 0.0 for an empty population.
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Compute rating distribution and sentiment split for a page of reviews.
///
/// `total_count` is the backend's count of all matching reviews; the page
/// may be a truncated sample of it, and percentages are over the page.
/// Ratings outside 1..=5 are ignored for the distribution but still count
/// toward the sample size, matching what the backend reports.
fn compute_analytics(product_id: &str, total_count: u64, reviews: &[Review]) -> ReviewAnalytics {
    let total = reviews.len();

    let mut star_counts = [0usize; 5];
    let mut rating_sum = 0u64;
    for review in reviews {
        if (1..=5).contains(&review.rating) {
            star_counts[(review.rating - 1) as usize] += 1;
            rating_sum += review.rating as u64;
        }
    }

    let rated = star_counts.iter().sum::<usize>();
    let average_rating = if rated == 0 {
        0.0
    } else {
        (rating_sum as f64 / rated as f64 * 100.0).round() / 100.0
    };

    let distribution = (1u8..=5)
        .map(|stars| StarBucket {
            stars,
            count: star_counts[(stars - 1) as usize],
            percent: percent(star_counts[(stars - 1) as usize], total),
        })
        .collect();

    let positive = star_counts[3] + star_counts[4];
    let neutral = star_counts[2];
    let negative = star_counts[0] + star_counts[1];

    ReviewAnalytics {
        product_id: product_id.to_string(),
        total_reviews: total_count,
        sampled_reviews: total,
        average_rating,
        distribution,
        sentiment: SentimentSplit {
            positive_percent: percent(positive, total),
            neutral_percent: percent(neutral, total),
            negative_percent: percent(negative, total),
        },
    }
}

impl ReviewTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ReviewTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: ReviewToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Review tool action: {}", params.action);

        let client = self.gateway.reviews();
        let result = match params.action.as_str() {
            "search" => {
                let request = SearchReviewsRequest {
                    product_id: params.product_id,
                    store_id: params.store_id,
                    status: params.status,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_reviews(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            "get" => {
                let review_id = required(params.review_id, "review_id", "get")?;
                client
                    .get_review(&review_id)
                    .await
                    .map(|r| to_pretty_response(&r))
            }
            "approve" => {
                if !self.gateway.writes_enabled(Domain::Reviews) {
                    return Ok(writes_disabled_response(Domain::Reviews));
                }
                let review_id = required(params.review_id, "review_id", "approve")?;
                client
                    .approve_review(&review_id)
                    .await
                    .map(|r| to_pretty_response(&r))
            }
            "reject" => {
                if !self.gateway.writes_enabled(Domain::Reviews) {
                    return Ok(writes_disabled_response(Domain::Reviews));
                }
                let review_id = required(params.review_id, "review_id", "reject")?;
                client
                    .reject_review(&review_id, params.reason)
                    .await
                    .map(|r| to_pretty_response(&r))
            }
            "analytics" => {
                let product_id = required(params.product_id, "product_id", "analytics")?;
                let request = SearchReviewsRequest {
                    product_id: Some(product_id.clone()),
                    store_id: params.store_id,
                    status: params.status,
                    skip: 0,
                    take: ANALYTICS_SAMPLE_SIZE,
                };
                client.search_reviews(&request).await.map(|page| {
                    to_pretty_response(&compute_analytics(
                        &product_id,
                        page.total_count,
                        &page.items,
                    ))
                })
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: search, get, approve, \
                     reject, analytics",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!("Review service error: {}", e))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_reviews".to_string(),
            description: "Works with product reviews. Actions: search reviews, \
                get one review, approve or reject a review, and analytics \
                (average rating, star distribution and sentiment percentages \
                for a product)."
                .to_string(),
            input_schema: schema::reviews_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: format!("r-{}", rating),
            product_id: "p-1".to_string(),
            rating,
            title: None,
            content: None,
            author_id: None,
            status: "Approved".to_string(),
            created_date: None,
        }
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(0, 3), 0.0);
        assert_eq!(percent(3, 3), 100.0);
    }

    #[test]
    fn test_analytics_empty_set_is_zeroed() {
        let analytics = compute_analytics("p-1", 0, &[]);
        assert_eq!(analytics.total_reviews, 0);
        assert_eq!(analytics.sampled_reviews, 0);
        assert_eq!(analytics.average_rating, 0.0);
        assert_eq!(analytics.sentiment.positive_percent, 0.0);
        assert!(analytics.distribution.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_analytics_distribution_and_sentiment() {
        let reviews = vec![review(5), review(5), review(4), review(3), review(1)];
        let analytics = compute_analytics("p-1", 5, &reviews);

        assert_eq!(analytics.total_reviews, 5);
        assert_eq!(analytics.sampled_reviews, 5);
        assert_eq!(analytics.average_rating, 3.6);

        let five_star = &analytics.distribution[4];
        assert_eq!(five_star.stars, 5);
        assert_eq!(five_star.count, 2);
        assert_eq!(five_star.percent, 40.0);

        assert_eq!(analytics.sentiment.positive_percent, 60.0);
        assert_eq!(analytics.sentiment.neutral_percent, 20.0);
        assert_eq!(analytics.sentiment.negative_percent, 20.0);
    }

    #[test]
    fn test_analytics_ignores_out_of_range_ratings_for_average() {
        let reviews = vec![review(5), review(0)];
        let analytics = compute_analytics("p-1", 2, &reviews);

        // The invalid rating still counts toward the sample
        assert_eq!(analytics.sampled_reviews, 2);
        assert_eq!(analytics.average_rating, 5.0);
        assert_eq!(analytics.distribution[4].percent, 50.0);
    }

    #[test]
    fn test_analytics_reports_backend_total_for_truncated_page() {
        let reviews = vec![review(5), review(4), review(2)];
        let analytics = compute_analytics("p-1", 437, &reviews);

        assert_eq!(analytics.total_reviews, 437);
        assert_eq!(analytics.sampled_reviews, 3);
        // Percentages stay over the fetched page, not the backend total
        assert_eq!(analytics.sentiment.positive_percent, 66.7);
        assert_eq!(analytics.sentiment.negative_percent, 33.3);
    }
}
