//! Integration tests for the survey endpoints.

mod common;

use axum::Router;
use axum::http::{Method, StatusCode, header};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use common::{
    assert_error, create_seeded_app_state, create_test_app_state, create_test_router, read_json,
    sample_survey_body, send, send_raw,
};
use survey_feedback_api::api::dto::{
    SurveyAnalyticsResponse, SurveyDetailResponse, SurveySummaryResponse,
};
use survey_feedback_api::domain::{QuestionType, SurveyStatus};

#[fixture]
fn app() -> Router {
    create_test_router(create_test_app_state())
}

async fn create_sample(app: &Router) -> SurveyDetailResponse {
    let response = send(app, Method::POST, "/surveys", Some(sample_survey_body())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

async fn create_published(app: &Router) -> SurveyDetailResponse {
    let survey = create_sample(app).await;
    let uri = format!("/surveys/{}/publish", survey.id);
    let response = send(app, Method::POST, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    survey
}

// =============================================================================
// Create / Read
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_survey_returns_draft_with_location(app: Router) {
    let response = send(&app, Method::POST, "/surveys", Some(sample_survey_body())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap();
    let survey: SurveyDetailResponse = read_json(response).await;

    assert_eq!(location, format!("/surveys/{}", survey.id));
    assert_eq!(survey.status, SurveyStatus::Draft);
    assert_eq!(survey.created_by, "admin");
    assert_eq!(survey.response_count, 0);
    assert_eq!(survey.questions.len(), 2);
    assert_eq!(survey.questions[0].kind, QuestionType::SingleChoice);
    assert_eq!(survey.questions[0].options.len(), 2);
    assert!(survey.questions[1].options.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_create_survey_keeps_author(app: Router) {
    let mut body = sample_survey_body();
    body["createdBy"] = json!("  dana  ");

    let response = send(&app, Method::POST, "/surveys", Some(body)).await;
    let survey: SurveyDetailResponse = read_json(response).await;
    assert_eq!(survey.created_by, "dana");
}

#[rstest]
#[case(json!({"title": "", "questions": []}), "Title is required")]
#[case(json!({"title": "T", "questions": []}), "At least one question is required")]
#[case(
    json!({"title": "T", "questions": [{"text": " ", "type": "Text"}]}),
    "Question text is required"
)]
#[tokio::test]
async fn test_create_survey_validation(app: Router, #[case] body: Value, #[case] message: &str) {
    let response = send(&app, Method::POST, "/surveys", Some(body)).await;
    assert_error(response, StatusCode::BAD_REQUEST, message).await;

    let list: Vec<SurveySummaryResponse> =
        read_json(send(&app, Method::GET, "/surveys", None).await).await;
    assert!(list.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_create_survey_malformed_json_is_bad_request(app: Router) {
    let response = send_raw(&app, Method::POST, "/surveys", "{\"title\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[rstest]
#[tokio::test]
async fn test_list_surveys_in_insertion_order(app: Router) {
    let first = create_sample(&app).await;
    let second = create_sample(&app).await;

    let response = send(&app, Method::GET, "/surveys", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list: Vec<SurveySummaryResponse> = read_json(response).await;

    let ids: Vec<_> = list.iter().map(|summary| summary.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[rstest]
#[tokio::test]
async fn test_get_survey(app: Router) {
    let created = create_sample(&app).await;

    let response = send(&app, Method::GET, &format!("/surveys/{}", created.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: SurveyDetailResponse = read_json(response).await;
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test]
async fn test_get_unknown_survey_is_not_found(app: Router) {
    let uri = format!("/surveys/{}", uuid::Uuid::new_v4());
    let response = send(&app, Method::GET, &uri, None).await;
    assert_error(response, StatusCode::NOT_FOUND, "Survey not found").await;
}

#[rstest]
#[tokio::test]
async fn test_malformed_survey_id_is_bad_request(app: Router) {
    let response = send(&app, Method::GET, "/surveys/not-a-uuid", None).await;
    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "Invalid survey id: 'not-a-uuid'",
    )
    .await;
}

// =============================================================================
// Update / Lifecycle / Delete
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_update_draft_replaces_content(app: Router) {
    let created = create_sample(&app).await;
    let body = json!({
        "title": "Cafeteria v2",
        "description": "",
        "questions": [{"text": "Anything else?", "type": "Text"}]
    });

    let uri = format!("/surveys/{}", created.id);
    let response = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: SurveyDetailResponse = read_json(response).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Cafeteria v2");
    assert_eq!(updated.created_at_utc, created.created_at_utc);
    assert_eq!(updated.questions.len(), 1);
    assert_eq!(updated.status, SurveyStatus::Draft);
}

#[rstest]
#[tokio::test]
async fn test_update_published_survey_is_conflict(app: Router) {
    let survey = create_published(&app).await;

    let uri = format!("/surveys/{}", survey.id);
    let response = send(&app, Method::PUT, &uri, Some(sample_survey_body())).await;
    assert_error(
        response,
        StatusCode::CONFLICT,
        "Only draft surveys can be updated",
    )
    .await;
}

#[rstest]
#[tokio::test]
async fn test_lifecycle_transitions(app: Router) {
    let survey = create_sample(&app).await;
    let publish = format!("/surveys/{}/publish", survey.id);
    let close = format!("/surveys/{}/close", survey.id);

    let response = send(&app, Method::POST, &close, None).await;
    assert_error(
        response,
        StatusCode::CONFLICT,
        "Only published surveys can be closed",
    )
    .await;

    let response = send(&app, Method::POST, &publish, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::POST, &publish, None).await;
    assert_error(
        response,
        StatusCode::CONFLICT,
        "Only draft surveys can be published",
    )
    .await;

    let response = send(&app, Method::POST, &close, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let detail: SurveyDetailResponse =
        read_json(send(&app, Method::GET, &format!("/surveys/{}", survey.id), None).await).await;
    assert_eq!(detail.status, SurveyStatus::Closed);
}

#[rstest]
#[case("publish")]
#[case("close")]
#[tokio::test]
async fn test_transition_unknown_survey_is_not_found(app: Router, #[case] action: &str) {
    let uri = format!("/surveys/{}/{action}", uuid::Uuid::new_v4());
    let response = send(&app, Method::POST, &uri, None).await;
    assert_error(response, StatusCode::NOT_FOUND, "Survey not found").await;
}

#[rstest]
#[tokio::test]
async fn test_delete_survey(app: Router) {
    let survey = create_published(&app).await;
    let uri = format!("/surveys/{}", survey.id);

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Responses and Analytics
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_worked_example(app: Router) {
    let survey = create_published(&app).await;
    let choice = &survey.questions[0];
    let text = &survey.questions[1];
    let yes = choice.options[0].id;
    let no = choice.options[1].id;
    let responses = format!("/surveys/{}/responses", survey.id);

    for (option, comment) in [(yes, "More salad"), (yes, "Nothing"), (no, "Cheaper")] {
        let body = json!({"answers": [
            {"questionId": choice.id, "selectedOptionId": option},
            {"questionId": text.id, "textAnswer": comment}
        ]});
        let response = send(&app, Method::POST, &responses, Some(body)).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let uri = format!("/surveys/{}/analytics", survey.id);
    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let analytics: SurveyAnalyticsResponse = read_json(response).await;

    assert_eq!(analytics.survey_id, survey.id);
    assert_eq!(analytics.total_responses, 3);
    assert_eq!(analytics.questions.len(), 2);

    let choice_stats = &analytics.questions[0];
    assert_eq!(choice_stats.response_count, 3);
    let counts: Vec<_> = choice_stats
        .options
        .iter()
        .map(|option| (option.text.as_str(), option.count))
        .collect();
    assert_eq!(counts, vec![("Yes", 2), ("No", 1)]);

    let text_stats = &analytics.questions[1];
    assert_eq!(text_stats.response_count, 3);
    assert!(text_stats.options.is_empty());

    let detail: SurveyDetailResponse =
        read_json(send(&app, Method::GET, &format!("/surveys/{}", survey.id), None).await).await;
    assert_eq!(detail.response_count, 3);
}

#[rstest]
#[tokio::test]
async fn test_response_to_draft_is_conflict(app: Router) {
    let survey = create_sample(&app).await;
    let uri = format!("/surveys/{}/responses", survey.id);
    let body = json!({"answers": [
        {"questionId": survey.questions[1].id, "textAnswer": "hello"}
    ]});

    let response = send(&app, Method::POST, &uri, Some(body)).await;
    assert_error(
        response,
        StatusCode::CONFLICT,
        "Responses are only accepted for published surveys",
    )
    .await;
}

#[rstest]
#[tokio::test]
async fn test_invalid_answers_are_rejected(app: Router) {
    let survey = create_published(&app).await;
    let uri = format!("/surveys/{}/responses", survey.id);
    let choice = survey.questions[0].id;
    let text = survey.questions[1].id;

    let cases = [
        (
            json!({"answers": [{"questionId": uuid::Uuid::new_v4(), "textAnswer": "x"}]}),
            "Question not found in survey",
        ),
        (
            json!({"answers": [{"questionId": choice}]}),
            "SelectedOptionId is required for single choice questions",
        ),
        (
            json!({"answers": [{"questionId": choice, "selectedOptionId": uuid::Uuid::new_v4()}]}),
            "Selected option is invalid for the question",
        ),
        (
            json!({"answers": [{"questionId": text, "textAnswer": "   "}]}),
            "TextAnswer is required for text questions",
        ),
    ];

    for (body, message) in cases {
        let response = send(&app, Method::POST, &uri, Some(body)).await;
        assert_error(response, StatusCode::BAD_REQUEST, message).await;
    }

    let analytics: SurveyAnalyticsResponse =
        read_json(send(&app, Method::GET, &format!("/surveys/{}/analytics", survey.id), None).await)
            .await;
    assert_eq!(analytics.total_responses, 0);
}

#[rstest]
#[tokio::test]
async fn test_empty_response_is_accepted(app: Router) {
    let survey = create_published(&app).await;
    let uri = format!("/surveys/{}/responses", survey.id);

    let response = send(&app, Method::POST, &uri, Some(json!({"answers": []}))).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[rstest]
#[tokio::test]
async fn test_analytics_unknown_survey_is_not_found(app: Router) {
    let uri = format!("/surveys/{}/analytics", uuid::Uuid::new_v4());
    let response = send(&app, Method::GET, &uri, None).await;
    assert_error(response, StatusCode::NOT_FOUND, "Survey not found").await;
}

// =============================================================================
// Seeded Store
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_seeded_store_exposes_example_survey() {
    let app = create_test_router(create_seeded_app_state());

    let list: Vec<SurveySummaryResponse> =
        read_json(send(&app, Method::GET, "/surveys", None).await).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Campus Facilities Feedback");
    assert_eq!(list[0].status, SurveyStatus::Published);

    let detail: SurveyDetailResponse =
        read_json(send(&app, Method::GET, &format!("/surveys/{}", list[0].id), None).await).await;
    let options: Vec<_> = detail.questions[0]
        .options
        .iter()
        .map(|option| option.text.as_str())
        .collect();
    assert_eq!(options, vec!["Excellent", "Good", "Average", "Poor"]);
    assert_eq!(detail.questions[1].kind, QuestionType::Text);
}

#[rstest]
#[tokio::test]
async fn test_health_check(app: Router) {
    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "healthy");
}
