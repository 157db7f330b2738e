//! Prompt templates for the three suggestion operations.
//!
//! Every template asks for Indonesian output and a single JSON object in
//! the response shape the gateway parses.

use crate::ports::{
    PositioningRequest, SegmentDiscoveryRequest, TargetRecommendationRequest,
    SUGGESTED_MIN_SEGMENTS,
};

/// Shared system prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert marketing consultant for small and \
medium businesses in Indonesia. Write every value in Indonesian. Respond with a single \
JSON object and nothing else: no markdown fences, no commentary.";

/// Step 1 prompt.
pub fn segment_discovery(request: &SegmentDiscoveryRequest) -> String {
    format!(
        "Suggest potential market segments for a business based on its type and products.\n\
         \n\
         Business Type: {business_type}\n\
         Products: {products}\n\
         \n\
         Suggest at least {min} market segments.\n\
         Respond as: {{\"marketSegments\": [\"...\"]}}",
        business_type = request.business_type,
        products = request.products.trim(),
        min = SUGGESTED_MIN_SEGMENTS,
    )
}

/// Step 2 prompt.
pub fn target_recommendation(request: &TargetRecommendationRequest) -> String {
    format!(
        "Analyze the business below and recommend the two best market segments to target. \
         Base the choice on purchasing power, market size and accessibility, and explain \
         the reason for each.\n\
         \n\
         Business Type: {business_type}\n\
         Products Sold: {products}\n\
         Potential Market Segments: {segments}\n\
         \n\
         The recommendedSegments array must contain exactly two entries.\n\
         Respond as: {{\"recommendedSegments\": [{{\"segment\": \"...\", \"reason\": \"...\"}}, \
         {{\"segment\": \"...\", \"reason\": \"...\"}}]}}",
        business_type = request.business_type,
        products = request.products_sold.trim(),
        segments = request.market_segments.join(", "),
    )
}

/// Step 3 prompt.
pub fn positioning(request: &PositioningRequest) -> String {
    format!(
        "Suggest a unique niche and a positioning statement that will help this business \
         differentiate itself from competitors in its selected market segments.\n\
         \n\
         Business Name: {name}\n\
         Business Type: {business_type}\n\
         Products Sold: {products}\n\
         Selected Market Segments: {segments}\n\
         \n\
         Respond as: {{\"nicheSuggestion\": \"...\", \"positioningStatement\": \"...\"}}",
        name = request.business_name.trim(),
        business_type = request.business_type,
        products = request.products_sold.trim(),
        segments = request.selected_market_segments.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::BusinessType;

    #[test]
    fn discovery_prompt_carries_inputs() {
        let prompt = segment_discovery(&SegmentDiscoveryRequest {
            business_type: BusinessType::FoodAndBeverage,
            products: " Cold brew coffee ".into(),
        });
        assert!(prompt.contains("Business Type: F&B"));
        assert!(prompt.contains("Products: Cold brew coffee\n"));
        assert!(prompt.contains("at least 3"));
        assert!(prompt.contains("{\"marketSegments\""));
    }

    #[test]
    fn targeting_prompt_lists_segments() {
        let prompt = target_recommendation(&TargetRecommendationRequest {
            business_type: BusinessType::Fashion,
            products_sold: "Batik shirts".into(),
            market_segments: vec!["Mahasiswa".into(), "Pekerja kantoran".into()],
        });
        assert!(prompt.contains("Potential Market Segments: Mahasiswa, Pekerja kantoran"));
        assert!(prompt.contains("exactly two"));
    }

    #[test]
    fn positioning_prompt_names_business() {
        let prompt = positioning(&PositioningRequest {
            business_name: "Kain Nusantara".into(),
            business_type: BusinessType::Fashion,
            products_sold: "Batik shirts".into(),
            selected_market_segments: vec!["Mahasiswa".into()],
        });
        assert!(prompt.contains("Business Name: Kain Nusantara"));
        assert!(prompt.contains("Selected Market Segments: Mahasiswa"));
    }

    #[test]
    fn system_prompt_requires_indonesian_json() {
        assert!(SYSTEM_PROMPT.contains("Indonesian"));
        assert!(SYSTEM_PROMPT.contains("JSON"));
    }
}
