use serde::Deserialize;

use super::SupabaseClient;
use crate::core::{
    derive_categories,
    NewEntry,
    Profile,
    VocabEntry,
    VocadexError,
};

const VOCAB_TABLE: &str = "vocab";
const PROFILES_TABLE: &str = "profiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    WordAscending,
    NewestFirst,
}

impl EntryOrder {
    fn param(self) -> &'static str {
        match self {
            EntryOrder::WordAscending => "word.asc",
            EntryOrder::NewestFirst => "created_at.desc",
        }
    }
}

/// A select over the vocab table: optional category equality plus an
/// optional case-insensitive substring search over word OR meaning. The
/// matching runs server-side.
#[derive(Debug, Clone)]
pub struct EntryQuery {
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub order: EntryOrder,
}

impl EntryQuery {
    pub fn for_category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            keyword: None,
            order: EntryOrder::WordAscending,
        }
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        if let Some(category) = &self.category {
            params.push(("cat".to_string(), format!("eq.{}", category)));
        }

        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            params.push((
                "or".to_string(),
                format!("(word.ilike.*{}*,meaning.ilike.*{}*)", keyword, keyword),
            ));
        }

        params.push(("order".to_string(), self.order.param().to_string()));
        params
    }
}

// PostgREST failure body; every field is optional in practice.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

async fn rest_error(response: reqwest::Response) -> VocadexError {
    let status = response.status();
    match response.json::<PostgrestError>().await {
        Ok(body) => VocadexError::Backend {
            message: body
                .message
                .unwrap_or_else(|| format!("Request failed (HTTP {})", status)),
            details: body.details.or_else(|| body.code.map(|code| format!("code {}", code))),
            hint: body.hint,
        },
        Err(_) => VocadexError::backend(format!("Request failed (HTTP {})", status)),
    }
}

async fn select<T>(
    client: &SupabaseClient,
    table: &str,
    params: &[(String, String)],
) -> Result<Vec<T>, VocadexError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = client.endpoint(&format!("/rest/v1/{}", table));
    let response = client.authed(client.http().get(&url)).query(params).send().await?;

    if !response.status().is_success() {
        return Err(rest_error(response).await);
    }

    Ok(response.json().await?)
}

/// The derived category list: every `cat` value, deduplicated and sorted
/// client-side so the result always reflects the current table contents.
pub async fn fetch_categories(client: &SupabaseClient) -> Result<Vec<String>, VocadexError> {
    #[derive(Deserialize)]
    struct CatRow {
        cat: String,
    }

    let params = vec![
        ("select".to_string(), "cat".to_string()),
        ("order".to_string(), "cat.asc".to_string()),
    ];
    let rows: Vec<CatRow> = select(client, VOCAB_TABLE, &params).await?;

    Ok(derive_categories(rows.into_iter().map(|row| row.cat)))
}

pub async fn fetch_entries(
    client: &SupabaseClient,
    query: &EntryQuery,
) -> Result<Vec<VocabEntry>, VocadexError> {
    select(client, VOCAB_TABLE, &query.params()).await
}

pub async fn insert_entry(
    client: &SupabaseClient,
    entry: &NewEntry,
) -> Result<VocabEntry, VocadexError> {
    let url = client.endpoint(&format!("/rest/v1/{}", VOCAB_TABLE));
    let response = client
        .authed(client.http().post(&url))
        .header("Prefer", "return=representation")
        .json(&[entry])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(rest_error(response).await);
    }

    let mut rows: Vec<VocabEntry> = response.json().await?;
    rows.pop().ok_or_else(|| VocadexError::backend("Insert returned no row"))
}

pub async fn delete_entry(client: &SupabaseClient, id: i64) -> Result<(), VocadexError> {
    let url = client.endpoint(&format!("/rest/v1/{}", VOCAB_TABLE));
    let params = [("id".to_string(), format!("eq.{}", id))];
    let response = client.authed(client.http().delete(&url)).query(&params).send().await?;

    if !response.status().is_success() {
        return Err(rest_error(response).await);
    }

    Ok(())
}

pub async fn fetch_profiles(client: &SupabaseClient) -> Result<Vec<Profile>, VocadexError> {
    let params = vec![
        ("select".to_string(), "*".to_string()),
        ("limit".to_string(), "100".to_string()),
    ];
    select(client, PROFILES_TABLE, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_category_query_filters_and_orders() {
        let query = EntryQuery::for_category("Animals");
        let params = query.params();

        assert_eq!(param(&params, "cat"), Some("eq.Animals"));
        assert_eq!(param(&params, "order"), Some("word.asc"));
        assert_eq!(param(&params, "or"), None);
    }

    #[test]
    fn test_keyword_matches_word_or_meaning() {
        let mut query = EntryQuery::for_category("Greetings");
        query.keyword = Some("hola".to_string());
        let params = query.params();

        assert_eq!(
            param(&params, "or"),
            Some("(word.ilike.*hola*,meaning.ilike.*hola*)")
        );
        assert_eq!(param(&params, "cat"), Some("eq.Greetings"));
    }

    #[test]
    fn test_blank_keyword_is_dropped() {
        let mut query = EntryQuery::for_category("Greetings");
        query.keyword = Some("   ".to_string());

        assert_eq!(param(&query.params(), "or"), None);
    }

    #[test]
    fn test_unfiltered_query_covers_all_categories() {
        let query = EntryQuery {
            category: None,
            keyword: None,
            order: EntryOrder::NewestFirst,
        };
        let params = query.params();

        assert_eq!(param(&params, "cat"), None);
        assert_eq!(param(&params, "order"), Some("created_at.desc"));
    }
}
