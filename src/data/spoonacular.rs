//! Spoonacular API client
//!
//! This module fetches recipe and ingredient data from the Spoonacular API and
//! reshapes the responses into our own data structures. It is only called on a
//! cache miss; caching is the caller's concern.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use super::{DetailedIngredient, Ingredient, Instruction, Recipe, RecipeDetails};

/// Base URL for the Spoonacular API
pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

/// Base URL for ingredient thumbnails
const INGREDIENT_IMAGE_BASE_URL: &str = "https://spoonacular.com/cdn/ingredients_100x100";

/// Number of recipes requested per search
const RECIPE_RESULTS: u32 = 12;

/// Number of ingredient suggestions requested per search
const INGREDIENT_RESULTS: u32 = 10;

const DEFAULT_PREP_TIME: &str = "15 min";
const DEFAULT_COOK_TIME: &str = "30 min";
const DEFAULT_TOTAL_TIME: &str = "45 min";
const DEFAULT_SERVINGS: u32 = 4;

/// Longest description kept for recipe summaries
const SUMMARY_DESCRIPTION_LEN: usize = 150;

/// Longest description kept for recipe details
const DETAILS_DESCRIPTION_LEN: usize = 200;

/// Errors that can occur when calling the Spoonacular API
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed with status: {0}")]
    Status(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Recipe entry returned by `findByIngredients`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecipe {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    used_ingredient_count: usize,
    #[serde(default)]
    used_ingredients: Vec<ApiIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<ApiIngredient>,
}

/// Ingredient as it appears inside recipe payloads
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiIngredient {
    id: i64,
    amount: f64,
    unit: String,
    unit_long: String,
    aisle: Option<String>,
    name: String,
    original: String,
    original_name: String,
    meta: Vec<String>,
    image: Option<String>,
}

/// Full recipe information from `/recipes/{id}/information` and `/recipes/random`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiRecipeInfo {
    id: i64,
    title: String,
    image: Option<String>,
    servings: u32,
    ready_in_minutes: Option<i64>,
    preparation_minutes: Option<i64>,
    cooking_minutes: Option<i64>,
    source_url: Option<String>,
    spoonacular_source_url: Option<String>,
    health_score: f64,
    price_per_serving: f64,
    analyzed_instructions: Vec<ApiInstructionBlock>,
    cheap: bool,
    cuisines: Vec<String>,
    dairy_free: bool,
    diets: Vec<String>,
    gluten_free: bool,
    instructions: Option<String>,
    occasions: Vec<String>,
    sustainable: bool,
    vegan: bool,
    vegetarian: bool,
    very_healthy: bool,
    very_popular: bool,
    dish_types: Vec<String>,
    extended_ingredients: Vec<ApiIngredient>,
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiInstructionBlock {
    steps: Vec<ApiStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiStep {
    number: u32,
    step: String,
}

/// Response of `/recipes/random`
#[derive(Debug, Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<ApiRecipeInfo>,
}

/// Response of `/food/ingredients/search`
#[derive(Debug, Deserialize)]
struct IngredientSearchResponse {
    #[serde(default)]
    results: Vec<IngredientSearchResult>,
}

#[derive(Debug, Deserialize)]
struct IngredientSearchResult {
    id: i64,
    name: String,
    #[serde(default)]
    image: String,
}

/// Client for the Spoonacular API
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl SpoonacularClient {
    /// Creates a client that sends `api_key` and gives up after `timeout`
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: SPOONACULAR_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Points the client at a different API base (for proxies and testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET to `path` with the API key and `params`, decoding the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn classify(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::RequestFailed(error)
        }
    }

    /// Finds recipes that use the given ingredients, best matches first
    pub async fn find_by_ingredients(&self, terms: &[String]) -> Result<Vec<Recipe>, ProviderError> {
        info!(?terms, "calling Spoonacular for recipes by ingredients");
        let api_recipes: Vec<ApiRecipe> = self
            .get_json(
                "/recipes/findByIngredients",
                &[
                    ("ingredients", terms.join(",")),
                    ("number", RECIPE_RESULTS.to_string()),
                    ("ranking", "1".to_string()),
                    ("ignorePantry", "true".to_string()),
                ],
            )
            .await?;

        let mut recipes: Vec<Recipe> = api_recipes.into_iter().map(convert_recipe).collect();
        recipes.sort_by(|a, b| b.match_count.cmp(&a.match_count));

        info!(count = recipes.len(), "found recipes from Spoonacular");
        Ok(recipes)
    }

    /// Fetches a random selection of recipes, used when no ingredients are given
    pub async fn random_recipes(&self) -> Result<Vec<Recipe>, ProviderError> {
        info!("calling Spoonacular for popular recipes");
        let response: RandomResponse = self
            .get_json("/recipes/random", &[("number", RECIPE_RESULTS.to_string())])
            .await?;

        let recipes: Vec<Recipe> = response.recipes.into_iter().map(convert_recipe_info).collect();
        info!(count = recipes.len(), "found popular recipes from Spoonacular");
        Ok(recipes)
    }

    /// Fetches full information for one recipe
    pub async fn recipe_information(&self, id: &str) -> Result<RecipeDetails, ProviderError> {
        info!(id, "calling Spoonacular for recipe details");
        let info: ApiRecipeInfo = self
            .get_json(
                &format!("/recipes/{}/information", id),
                &[("includeNutrition", "false".to_string())],
            )
            .await?;

        Ok(convert_recipe_details(info))
    }

    /// Searches ingredient names for autocomplete
    pub async fn search_ingredients(&self, query: &str) -> Result<Vec<Ingredient>, ProviderError> {
        info!(query, "calling Spoonacular for ingredient search");
        let response: IngredientSearchResponse = self
            .get_json(
                "/food/ingredients/search",
                &[
                    ("query", query.to_string()),
                    ("number", INGREDIENT_RESULTS.to_string()),
                    ("metaInformation", "false".to_string()),
                ],
            )
            .await?;

        let ingredients: Vec<Ingredient> = response
            .results
            .into_iter()
            .map(|result| Ingredient {
                id: result.id,
                name: result.name,
                image: ingredient_image_url(&result.image),
            })
            .collect();

        info!(count = ingredients.len(), "found ingredients from Spoonacular");
        Ok(ingredients)
    }
}

/// Absolute URL of an ingredient thumbnail
fn ingredient_image_url(image: &str) -> String {
    format!("{}/{}", INGREDIENT_IMAGE_BASE_URL, image)
}

/// Removes the simple inline markup Spoonacular puts in titles and summaries
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with "..."
fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

/// "N min" for positive minute counts
fn minutes(value: Option<i64>) -> Option<String> {
    value.filter(|m| *m > 0).map(|m| format!("{} min", m))
}

fn convert_recipe(api: ApiRecipe) -> Recipe {
    let ingredients = api
        .used_ingredients
        .iter()
        .chain(api.missed_ingredients.iter())
        .map(|ing| ing.name.clone())
        .collect();

    Recipe {
        id: api.id.to_string(),
        title: strip_markup(&api.title),
        description: format!(
            "A delicious recipe that uses {} of your ingredients",
            api.used_ingredient_count
        ),
        ingredients,
        prep_time: DEFAULT_PREP_TIME.to_string(),
        cook_time: DEFAULT_COOK_TIME.to_string(),
        servings: DEFAULT_SERVINGS,
        image_url: api.image,
        match_count: api.used_ingredient_count,
    }
}

fn convert_recipe_info(api: ApiRecipeInfo) -> Recipe {
    let summary = strip_markup(api.summary.as_deref().unwrap_or_default());

    Recipe {
        id: api.id.to_string(),
        title: api.title,
        description: truncate_description(&summary, SUMMARY_DESCRIPTION_LEN),
        ingredients: api.extended_ingredients.into_iter().map(|ing| ing.name).collect(),
        prep_time: minutes(api.preparation_minutes).unwrap_or_else(|| DEFAULT_PREP_TIME.to_string()),
        cook_time: minutes(api.cooking_minutes)
            .or_else(|| minutes(api.ready_in_minutes))
            .unwrap_or_else(|| DEFAULT_COOK_TIME.to_string()),
        servings: api.servings,
        image_url: api.image.unwrap_or_default(),
        match_count: 0,
    }
}

/// Steps from the first analyzed block, else the `<li>` items of the plain text
fn extract_instructions(blocks: &[ApiInstructionBlock], plain: Option<&str>) -> Vec<Instruction> {
    let analyzed: Vec<Instruction> = blocks
        .first()
        .map(|block| {
            block
                .steps
                .iter()
                .map(|step| Instruction {
                    number: step.number,
                    step: step.step.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    if !analyzed.is_empty() {
        return analyzed;
    }

    let text = plain
        .unwrap_or_default()
        .replace("</li>", "\n")
        .replace("<ol>", "")
        .replace("</ol>", "")
        .replace("<li>", "");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .zip(1..)
        .map(|(line, number)| Instruction {
            number,
            step: line.to_string(),
        })
        .collect()
}

fn convert_recipe_details(api: ApiRecipeInfo) -> RecipeDetails {
    let instructions = extract_instructions(&api.analyzed_instructions, api.instructions.as_deref());
    let summary = strip_markup(api.summary.as_deref().unwrap_or_default());

    let ingredients = api
        .extended_ingredients
        .into_iter()
        .map(|ing| DetailedIngredient {
            id: ing.id,
            image: ingredient_image_url(ing.image.as_deref().unwrap_or_default()),
            name: ing.name,
            original_name: ing.original_name,
            amount: ing.amount,
            unit: ing.unit,
            unit_long: ing.unit_long,
            original: ing.original,
            aisle: ing.aisle.unwrap_or_default(),
            meta: ing.meta,
        })
        .collect();

    RecipeDetails {
        id: api.id.to_string(),
        title: api.title,
        description: truncate_description(&summary, DETAILS_DESCRIPTION_LEN),
        summary,
        ingredients,
        instructions,
        prep_time: minutes(api.preparation_minutes).unwrap_or_else(|| DEFAULT_PREP_TIME.to_string()),
        cook_time: minutes(api.cooking_minutes).unwrap_or_else(|| DEFAULT_COOK_TIME.to_string()),
        total_time: minutes(api.ready_in_minutes).unwrap_or_else(|| DEFAULT_TOTAL_TIME.to_string()),
        servings: api.servings,
        image_url: api.image.unwrap_or_default(),
        source_url: api.source_url.unwrap_or_default(),
        spoonacular_url: api.spoonacular_source_url.unwrap_or_default(),
        health_score: api.health_score,
        price_per_serving: api.price_per_serving,
        cuisines: api.cuisines,
        dish_types: api.dish_types,
        diets: api.diets,
        occasions: api.occasions,
        is_vegetarian: api.vegetarian,
        is_vegan: api.vegan,
        is_gluten_free: api.gluten_free,
        is_dairy_free: api.dairy_free,
        is_very_healthy: api.very_healthy,
        is_cheap: api.cheap,
        is_popular: api.very_popular,
        is_sustainable: api.sustainable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Sample findByIngredients response
    const SAMPLE_FIND_RESPONSE: &str = r#"[
        {
            "id": 641803,
            "title": "Easy <b>Tomato</b> Soup",
            "image": "https://img.spoonacular.com/recipes/641803-312x231.jpg",
            "imageType": "jpg",
            "usedIngredientCount": 1,
            "missedIngredientCount": 2,
            "usedIngredients": [{"id": 11529, "name": "tomato", "amount": 2.0, "unit": ""}],
            "missedIngredients": [
                {"id": 11282, "name": "onion"},
                {"id": 1002014, "name": "cumin", "aisle": null}
            ],
            "likes": 4
        },
        {
            "id": 715538,
            "title": "Bruschetta",
            "image": "https://img.spoonacular.com/recipes/715538-312x231.jpg",
            "usedIngredientCount": 2,
            "usedIngredients": [{"name": "tomato"}, {"name": "basil"}],
            "missedIngredients": []
        }
    ]"#;

    /// Sample recipe information response
    const SAMPLE_INFO_RESPONSE: &str = r#"{
        "id": 715538,
        "title": "Bruschetta",
        "image": "https://img.spoonacular.com/recipes/715538-556x370.jpg",
        "servings": 6,
        "readyInMinutes": 35,
        "preparationMinutes": -1,
        "cookingMinutes": null,
        "sourceUrl": "https://example.com/bruschetta",
        "spoonacularSourceUrl": "https://spoonacular.com/bruschetta-715538",
        "healthScore": 20.0,
        "pricePerServing": 103.5,
        "vegetarian": true,
        "vegan": false,
        "glutenFree": false,
        "veryPopular": true,
        "cuisines": ["Italian"],
        "dishTypes": ["antipasti", "starter"],
        "diets": [],
        "summary": "You can never have too many <b>Italian</b> recipes.",
        "extendedIngredients": [
            {
                "id": 11529,
                "aisle": "Produce",
                "image": "tomato.png",
                "name": "tomato",
                "original": "2 ripe tomatoes, diced",
                "originalName": "ripe tomatoes, diced",
                "amount": 2.0,
                "unit": "",
                "unitLong": "",
                "meta": ["ripe", "diced"]
            }
        ],
        "analyzedInstructions": [
            {"name": "", "steps": [
                {"number": 1, "step": "Dice the tomatoes."},
                {"number": 2, "step": "Toast the bread."}
            ]}
        ],
        "winePairing": {"pairedWines": []}
    }"#;

    #[test]
    fn test_convert_find_response() {
        let api: Vec<ApiRecipe> = serde_json::from_str(SAMPLE_FIND_RESPONSE).expect("Should parse");
        let recipes: Vec<Recipe> = api.into_iter().map(convert_recipe).collect();

        let soup = &recipes[0];
        assert_eq!(soup.id, "641803");
        assert_eq!(soup.title, "Easy Tomato Soup");
        assert_eq!(soup.ingredients, vec!["tomato", "onion", "cumin"]);
        assert_eq!(soup.description, "A delicious recipe that uses 1 of your ingredients");
        assert_eq!(soup.prep_time, "15 min");
        assert_eq!(soup.cook_time, "30 min");
        assert_eq!(soup.servings, 4);
        assert_eq!(soup.match_count, 1);
    }

    #[test]
    fn test_convert_recipe_details() {
        let api: ApiRecipeInfo = serde_json::from_str(SAMPLE_INFO_RESPONSE).expect("Should parse");
        let details = convert_recipe_details(api);

        assert_eq!(details.id, "715538");
        assert_eq!(details.prep_time, "15 min");
        assert_eq!(details.cook_time, "30 min");
        assert_eq!(details.total_time, "35 min");
        assert_eq!(details.summary, "You can never have too many Italian recipes.");
        assert_eq!(details.instructions.len(), 2);
        assert_eq!(details.instructions[1].step, "Toast the bread.");
        assert_eq!(
            details.ingredients[0].image,
            "https://spoonacular.com/cdn/ingredients_100x100/tomato.png"
        );
        assert_eq!(details.ingredients[0].aisle, "Produce");
        assert!(details.is_vegetarian);
        assert!(details.is_popular);
        assert_eq!(details.dish_types, vec!["antipasti", "starter"]);
    }

    #[test]
    fn test_convert_random_recipe_uses_ready_time() {
        let api: ApiRecipeInfo = serde_json::from_str(SAMPLE_INFO_RESPONSE).expect("Should parse");
        let recipe = convert_recipe_info(api);

        assert_eq!(recipe.prep_time, "15 min");
        assert_eq!(recipe.cook_time, "35 min");
        assert_eq!(recipe.ingredients, vec!["tomato"]);
        assert_eq!(recipe.match_count, 0);
    }

    #[test]
    fn test_random_response_parses() {
        let json = format!(r#"{{"recipes": [{}]}}"#, SAMPLE_INFO_RESPONSE);
        let response: RandomResponse = serde_json::from_str(&json).expect("Should parse");
        assert_eq!(response.recipes.len(), 1);
    }

    #[test]
    fn test_instructions_fall_back_to_plain_list() {
        let steps = extract_instructions(
            &[],
            Some("<ol><li>Boil water.</li><li> Add pasta. </li><li></li></ol>"),
        );

        assert_eq!(
            steps,
            vec![
                Instruction { number: 1, step: "Boil water.".to_string() },
                Instruction { number: 2, step: "Add pasta.".to_string() },
            ]
        );
        assert!(extract_instructions(&[], None).is_empty());
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>Bold</b> and <a href=\"x\">link</a>"), "Bold and link");
        assert_eq!(strip_markup("no tags"), "no tags");
        assert_eq!(strip_markup("dangling <b"), "dangling <b");
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short", 10), "short");
        assert_eq!(truncate_description("abcdef", 3), "abc...");
        assert_eq!(truncate_description("crème brûlée", 5), "crème...");
    }

    #[test]
    fn test_ingredient_search_response() {
        let json = r#"{"results": [{"id": 11529, "name": "tomato", "image": "tomato.png"}],
                       "offset": 0, "number": 10, "totalResults": 1}"#;
        let response: IngredientSearchResponse = serde_json::from_str(json).expect("Should parse");

        assert_eq!(response.results[0].name, "tomato");
        assert_eq!(
            ingredient_image_url(&response.results[0].image),
            "https://spoonacular.com/cdn/ingredients_100x100/tomato.png"
        );
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = SpoonacularClient::new("key", Duration::from_secs(5))
            .expect("Client should build")
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    /// Serves one connection with `reply` and hands back the request it received
    async fn serve_once(reply: String) -> (String, tokio::sync::oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Should bind");
        let addr = listener.local_addr().expect("Should have an address");
        let (tx, rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status_error() {
        let (base_url, _request) = serve_once(
            "HTTP/1.1 402 Payment Required\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        )
        .await;
        let client = SpoonacularClient::new("test-key", Duration::from_secs(5))
            .expect("Client should build")
            .with_base_url(base_url);

        let result = client.search_ingredients("tomato").await;

        assert!(
            matches!(result, Err(ProviderError::Status(StatusCode::PAYMENT_REQUIRED))),
            "unexpected result: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_silent_provider_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Should bind");
        let addr = listener.local_addr().expect("Should have an address");
        tokio::spawn(async move {
            // accept and hold the connection without answering
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let client = SpoonacularClient::new("test-key", Duration::from_millis(100))
            .expect("Client should build")
            .with_base_url(format!("http://{}", addr));

        let result = client.recipe_information("715538").await;

        assert!(
            matches!(result, Err(ProviderError::Timeout(t)) if t == Duration::from_millis(100)),
            "unexpected result: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_successful_search_sends_key_and_parameters() {
        let body = r#"{"results": [{"id": 11529, "name": "tomato", "image": "tomato.png"}]}"#;
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let (base_url, request) = serve_once(reply).await;
        let client = SpoonacularClient::new("test-key", Duration::from_secs(5))
            .expect("Client should build")
            .with_base_url(base_url);

        let ingredients = client
            .search_ingredients("tomato")
            .await
            .expect("Search should succeed");

        assert_eq!(ingredients.len(), 1);
        assert_eq!(
            ingredients[0].image,
            "https://spoonacular.com/cdn/ingredients_100x100/tomato.png"
        );

        let request = request.await.expect("Request should be captured");
        let request_line = request.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /food/ingredients/search?"));
        assert!(request_line.contains("apiKey=test-key"));
        assert!(request_line.contains("query=tomato"));
        assert!(request_line.contains("number=10"));
        assert!(request_line.contains("metaInformation=false"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        // port 9 on localhost is discard; connection is refused on test machines
        let client = SpoonacularClient::new("key", Duration::from_secs(2))
            .expect("Client should build")
            .with_base_url("http://127.0.0.1:9");

        let result = client.search_ingredients("tomato").await;
        assert!(result.is_err());
    }
}
