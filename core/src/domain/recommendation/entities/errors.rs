use thiserror::Error;

/// Failures of the AI recommendation pipeline. The messages are shown to users as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecommendationError {
    #[error("請輸入搜尋內容")]
    EmptyQuery,

    #[error("AI 回應格式錯誤，請重試")]
    MalformedAiResponse,

    #[error("AI 回應格式不完整，請重試")]
    IncompleteAiResponse,

    #[error("AI 分析過程中發生錯誤：{0}")]
    AiFailure(String),

    #[error("找不到符合條件的店家")]
    NoPlacesFound,

    #[error("在中央大學附近5公里內找不到符合條件的餐廳")]
    NothingWithinRadius,

    #[error("搜尋位置時發生錯誤，請稍後再試")]
    PlacesFailure,
}
