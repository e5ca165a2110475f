use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::{
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::ports::CheckinRepository,
    common::{
        entities::app_errors::CoreError, policies::Owned, ports::CacheStore, services::Service,
    },
    health::ports::HealthCheckRepository,
    llm::{entities::CompletionRequest, ports::LLMClient},
    media::ports::MediaStorage,
    nutrition::{
        analysis::{parse_food_analysis, recommend_by_keywords, suggested_record_name},
        entities::{FoodRecord, FoodRecordConfig, PreferenceKind},
        ports::{NutritionRepository, NutritionService},
        value_objects::{
            CreateFoodRecordInput, DASHBOARD_HEALTHY_CHOICES, FoodAnalysisOutput,
            FoodRecordFilter, HEALTHY_CALORIE_LIMIT, INGREDIENT_SAMPLE_SIZE, IngredientUsage,
            NutritionAdvice, NutritionDashboard, PREFERENCE_SAMPLE_SIZE, PreferenceGroup,
            TOP_INGREDIENTS,
        },
    },
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

const ADVISOR_UNAVAILABLE: &str = "AI服務暫時不可用，請稍後再試。";
const ADVISOR_EMPTY_ANSWER: &str = "抱歉，無法生成回答。請重新提問或稍後再試。";

fn advice_prompt(question: &str) -> String {
    format!(
        "你是一位專業的營養師和飲食顧問。請用中文回答以下關於飲食和營養的問題，並盡可能提供科學依據和具體建議：\n\n\
         問題：{question}\n\n\
         請提供準確、實用且詳細的回答，但不要太長。"
    )
}

fn food_analysis_prompt(description: &str) -> String {
    format!(
        "你是一位專業的營養師和飲食顧問。請分析以下食物的營養成分和健康影響：\n\n\
         食物：{description}\n\n\
         請提供以下資訊：\n\
         1. 大致的熱量、蛋白質、碳水化合物和脂肪含量的估計值\n\
         2. 這些食物的營養價值評價\n\
         3. 對健康的可能影響\n\
         4. 如何使這頓飯更健康的建議\n\n\
         請務必使用下面的JSON格式回答，確保它是有效的JSON格式：\n\
         {{\n\
         \"calories\": 數字,\n\
         \"protein\": 數字,\n\
         \"carbs\": 數字,\n\
         \"fat\": 數字,\n\
         \"nutritional_value\": \"營養價值評價文字\",\n\
         \"health_impact\": \"健康影響分析文字\",\n\
         \"improvement_suggestions\": [\"建議1\", \"建議2\", \"建議3\", \"建議4\"]\n\
         }}"
    )
}

fn ensure_non_negative(label: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0.0 => Err(CoreError::Invalid(format!("{label} must not be negative"))),
        _ => Ok(()),
    }
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> NutritionService
    for Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    NU: NutritionRepository,
    CK: CheckinRepository,
    AR: ArticleRepository,
    RC: RecommendationRepository,
    U: UserRepository,
    SS: SessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    PL: PlacesClient,
    MS: MediaStorage,
    OA: OAuthProvider,
    CS: CacheStore,
{
    async fn dashboard(&self) -> Result<NutritionDashboard, CoreError> {
        let averages = self.nutrition_repository.averages().await?;
        let healthy_choices = self
            .nutrition_repository
            .healthy_choices(HEALTHY_CALORIE_LIMIT, DASHBOARD_HEALTHY_CHOICES)
            .await?;
        let restaurant_calories = self.nutrition_repository.restaurant_calories().await?;

        Ok(NutritionDashboard {
            averages,
            healthy_choices,
            restaurant_calories,
        })
    }

    async fn dietary_preferences(&self) -> Result<Vec<PreferenceGroup>, CoreError> {
        let groups = self
            .nutrition_repository
            .preference_groups(PreferenceKind::Diet, true, PREFERENCE_SAMPLE_SIZE)
            .await?;

        Ok(groups.into_iter().filter(|g| g.total_count > 0).collect())
    }

    async fn allergen_info(&self) -> Result<Vec<PreferenceGroup>, CoreError> {
        self.nutrition_repository
            .preference_groups(PreferenceKind::Allergy, false, PREFERENCE_SAMPLE_SIZE)
            .await
    }

    async fn ingredient_analysis(&self) -> Result<Vec<IngredientUsage>, CoreError> {
        self.nutrition_repository
            .top_ingredients(TOP_INGREDIENTS, INGREDIENT_SAMPLE_SIZE)
            .await
    }

    async fn nutrition_advice(&self, question: String) -> Result<NutritionAdvice, CoreError> {
        let question = question.trim().to_string();
        if question.is_empty() {
            return Ok(NutritionAdvice {
                question,
                answer: None,
                recommendations: Vec::new(),
            });
        }

        let answer = match self
            .llm_client
            .complete(CompletionRequest::new(advice_prompt(&question), 800))
            .await
        {
            Ok(text) if text.trim().is_empty() => ADVISOR_EMPTY_ANSWER.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                error!("Nutrition advisor completion failed: {}", e);
                ADVISOR_UNAVAILABLE.to_string()
            }
        };

        let available = self.restaurant_repository.list_available_menu_items().await?;
        let recommendations = {
            let mut rng = rand::thread_rng();
            recommend_by_keywords(&question, &available, &mut rng)
        };

        Ok(NutritionAdvice {
            question,
            answer: Some(answer),
            recommendations,
        })
    }

    async fn analyze_food(
        &self,
        identity: Identity,
        description: String,
    ) -> Result<FoodAnalysisOutput, CoreError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(CoreError::Invalid("description is required".to_string()));
        }

        let text = self
            .llm_client
            .complete(CompletionRequest::new(food_analysis_prompt(&description), 1000))
            .await?;

        let analysis = parse_food_analysis(&text);
        if analysis.error.is_some() {
            info!(user_id = %identity.id(), "Food analysis returned unstructured text");
        }

        Ok(FoodAnalysisOutput {
            suggested_name: suggested_record_name(&description),
            description,
            analysis,
        })
    }

    async fn create_food_record(
        &self,
        identity: Identity,
        input: CreateFoodRecordInput,
    ) -> Result<FoodRecord, CoreError> {
        let name = input.name.trim().to_string();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(CoreError::Invalid(
                "name must be between 1 and 100 characters".to_string(),
            ));
        }
        ensure_non_negative("calories", input.calories)?;
        ensure_non_negative("protein", input.protein)?;
        ensure_non_negative("carbs", input.carbs)?;
        ensure_non_negative("fat", input.fat)?;

        let record = FoodRecord::new(FoodRecordConfig {
            user_id: identity.id(),
            name,
            description: input.description,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
            image_url: input.image_url,
            consumed_at: input.consumed_at,
        });

        self.nutrition_repository.create_food_record(record).await
    }

    async fn list_food_records(
        &self,
        identity: Identity,
        filter: FoodRecordFilter,
    ) -> Result<Vec<FoodRecord>, CoreError> {
        self.nutrition_repository
            .list_food_records(identity.id(), filter)
            .await
    }

    async fn delete_food_record(&self, identity: Identity, record_id: Uuid) -> Result<(), CoreError> {
        let record = self
            .nutrition_repository
            .get_food_record(record_id)
            .await?
            .filter(|record| record.is_owned_by(&identity))
            .ok_or(CoreError::NotFound)?;

        self.nutrition_repository.delete_food_record(record.id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        common::{entities::app_errors::CoreError, testing::TestContext},
        nutrition::{ports::NutritionService, value_objects::CreateFoodRecordInput},
    };

    fn record_input(name: &str) -> CreateFoodRecordInput {
        CreateFoodRecordInput {
            name: name.to_string(),
            description: None,
            calories: Some(550.0),
            protein: None,
            carbs: None,
            fat: None,
            image_url: None,
            consumed_at: None,
        }
    }

    #[tokio::test]
    async fn analysis_parses_model_json() {
        let ctx = TestContext::new();
        ctx.llm_replies(r#"{"calories": 720, "protein": 32, "carbs": 95, "fat": 22, "nutritional_value": "均衡", "health_impact": "偏油", "improvement_suggestions": ["少油"]}"#);
        let service = ctx.service();
        let identity = ctx.identity("student");

        let output = service
            .analyze_food(identity, "排骨便當、紅茶".to_string())
            .await
            .unwrap();

        assert_eq!(output.suggested_name, "排骨便當");
        assert_eq!(output.analysis.calories, Some(720.0));
        assert_eq!(output.analysis.improvement_suggestions, vec!["少油"]);
    }

    #[tokio::test]
    async fn advisor_degrades_when_model_fails() {
        let ctx = TestContext::new();
        ctx.llm_fails();
        let service = ctx.service();

        let advice = service.nutrition_advice("減肥".to_string()).await.unwrap();
        assert_eq!(advice.answer.as_deref(), Some("AI服務暫時不可用，請稍後再試。"));
    }

    #[tokio::test]
    async fn empty_question_skips_the_model() {
        let ctx = TestContext::new();
        let service = ctx.service();

        let advice = service.nutrition_advice("   ".to_string()).await.unwrap();
        assert_eq!(advice.answer, None);
        assert_eq!(ctx.llm_calls(), 0);
    }

    #[tokio::test]
    async fn only_owner_can_delete_a_food_record() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let owner = ctx.identity("owner");
        let other = ctx.identity("other");

        let record = service
            .create_food_record(owner.clone(), record_input("午餐"))
            .await
            .unwrap();

        assert_eq!(
            service.delete_food_record(other, record.id).await.unwrap_err(),
            CoreError::NotFound
        );
        service.delete_food_record(owner, record.id).await.unwrap();
    }

    #[tokio::test]
    async fn negative_calories_are_rejected() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let mut input = record_input("晚餐");
        input.calories = Some(-1.0);

        assert!(matches!(
            service.create_food_record(ctx.identity("owner"), input).await,
            Err(CoreError::Invalid(_))
        ));
    }
}
