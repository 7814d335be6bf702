//! Conversational layer: free text in, Portuguese answer out.
//!
//! Matching is plain substring search on fixed trigger phrases, checked in
//! this order:
//! 1. "melhor gênero" / "maior avaliação" -> best genre
//! 2. "filmes de" / "top 5"               -> top movies of a genre
//! 3. "recomende" / "parecido com"        -> similar movies
//!
//! Anything else gets the help message.

use crate::queries::MovieQueries;
use crate::translations::{capitalize, portuguese_names, to_english, to_portuguese};
use anyhow::{Context, Result};
use tracing::debug;

pub const GREETING: &str = "Olá! Como posso ajudar você hoje?";

pub const HELP_MESSAGE: &str = "Desculpe, não entendi. Você pode perguntar sobre:\n\
    - 'Qual o melhor gênero?'\n\
    - 'Top 5 filmes de Ação'\n\
    - 'Recomende algo parecido com \"The Dark Knight\"'";

pub const BEST_GENRE_NOT_FOUND: &str = "Não consegui encontrar o melhor gênero.";

pub const MODEL_UNAVAILABLE: &str = "Desculpe, o modelo de recomendação não está disponível.";

pub const MISSING_TITLE: &str = "Por favor, me diga um filme para eu recomendar similares. \
    Ex: 'recomende algo parecido com Avatar'.";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    BestGenre,
    /// Lowercase Portuguese genre name as typed (may be empty or unknown)
    TopByGenre(String),
    /// Title fragment, if one was given
    Recommend(Option<String>),
    Unknown,
}

impl Intent {
    pub fn parse(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();

        if lowered.contains("melhor gênero") || lowered.contains("maior avaliação") {
            return Intent::BestGenre;
        }

        if lowered.contains("filmes de") || lowered.contains("top 5") {
            let genre = text_after(&lowered, "filmes de")
                .or_else(|| text_after(&lowered, "top 5"))
                .unwrap_or_default();
            return Intent::TopByGenre(genre.trim().to_string());
        }

        if lowered.contains("recomende") || lowered.contains("parecido com") {
            // Title keeps its original case, so split the original prompt
            let title = text_after(prompt, "parecido com")
                .or_else(|| text_after(prompt, "recomende"))
                .map(|rest| rest.trim().replace('"', ""))
                .filter(|title| !title.is_empty());
            return Intent::Recommend(title);
        }

        Intent::Unknown
    }
}

/// Text between the first and second occurrence of `marker`.
fn text_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.split(marker).nth(1)
}

/// The chatbot: maps each prompt to an intent and renders the answer.
#[derive(Debug, Clone)]
pub struct CineBot {
    queries: MovieQueries,
}

impl CineBot {
    pub fn new(queries: MovieQueries) -> Self {
        Self { queries }
    }

    pub fn queries(&self) -> &MovieQueries {
        &self.queries
    }

    pub fn queries_mut(&mut self) -> &mut MovieQueries {
        &mut self.queries
    }

    /// Answer one prompt. Only storage failures are errors.
    pub fn respond(&self, prompt: &str) -> Result<String> {
        let intent = Intent::parse(prompt);
        debug!("Prompt {:?} parsed as {:?}", prompt, intent);

        match intent {
            Intent::BestGenre => self.best_genre_response(),
            Intent::TopByGenre(genre_pt) => match to_english(&genre_pt) {
                Some(genre_en) => self.top_movies_response(genre_en),
                None => Ok(format!(
                    "Não reconheço o gênero '{}'. Tente um destes: {}.",
                    genre_pt,
                    portuguese_names().collect::<Vec<_>>().join(", ")
                )),
            },
            Intent::Recommend(Some(fragment)) => Ok(self.recommendation_response(&fragment)),
            Intent::Recommend(None) => Ok(MISSING_TITLE.to_string()),
            Intent::Unknown => Ok(HELP_MESSAGE.to_string()),
        }
    }

    fn best_genre_response(&self) -> Result<String> {
        let best = self
            .queries
            .best_genre()
            .context("Failed to query the best genre")?;

        Ok(match best {
            Some(rating) => format!(
                "O gênero com a melhor avaliação média é **{}**, com nota **{:.2}**!",
                capitalize(to_portuguese(&rating.genre_name)),
                rating.average_rating
            ),
            None => BEST_GENRE_NOT_FOUND.to_string(),
        })
    }

    fn top_movies_response(&self, genre_en: &str) -> Result<String> {
        let movies = self
            .queries
            .top_movies_by_genre(genre_en)
            .with_context(|| format!("Failed to query top movies for {}", genre_en))?;
        let genre_pt = to_portuguese(genre_en);

        if movies.is_empty() {
            return Ok(format!(
                "Não encontrei filmes para o gênero '{}'. Tente outro.",
                genre_pt
            ));
        }

        let mut response = format!(
            "Aqui estão os 5 filmes de **{}** mais bem avaliados:\n",
            capitalize(genre_pt)
        );
        for movie in &movies {
            response.push_str(&format!("- {} (Nota: {:.1})\n", movie.title, movie.vote_average));
        }
        Ok(response)
    }

    fn recommendation_response(&self, fragment: &str) -> String {
        if self.queries.context().model().is_none() {
            return MODEL_UNAVAILABLE.to_string();
        }

        let Some(title) = self.queries.find_title(fragment) else {
            return format!(
                "Não encontrei o filme '{}'. Tente digitar o título completo.",
                fragment
            );
        };

        match self.queries.similar_movies(&title) {
            Some(similar) => {
                let mut response =
                    format!("Se você gostou de **{}**, talvez também goste de:\n", title);
                for movie in similar {
                    response.push_str(&format!("- {}\n", movie));
                }
                response
            }
            None => format!("Não encontrei o filme '{}' na minha base de dados.", title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best_genre() {
        assert_eq!(Intent::parse("Qual o MELHOR GÊNERO?"), Intent::BestGenre);
        assert_eq!(Intent::parse("gênero de maior avaliação"), Intent::BestGenre);
    }

    #[test]
    fn test_parse_top_by_genre() {
        assert_eq!(
            Intent::parse("Top 5 filmes de Ação"),
            Intent::TopByGenre("ação".to_string())
        );
        assert_eq!(
            Intent::parse("top 5 ficção científica "),
            Intent::TopByGenre("ficção científica".to_string())
        );
        assert_eq!(Intent::parse("filmes de"), Intent::TopByGenre(String::new()));
    }

    #[test]
    fn test_best_genre_wins_over_top() {
        assert_eq!(Intent::parse("top 5 do melhor gênero"), Intent::BestGenre);
    }

    #[test]
    fn test_parse_recommend() {
        assert_eq!(
            Intent::parse("Recomende algo parecido com \"The Dark Knight\""),
            Intent::Recommend(Some("The Dark Knight".to_string()))
        );
        assert_eq!(
            Intent::parse("recomende Avatar"),
            Intent::Recommend(Some("Avatar".to_string()))
        );
        // Trigger matched case-insensitively, but the split is case-sensitive
        assert_eq!(Intent::parse("Recomende algo"), Intent::Recommend(None));
        assert_eq!(Intent::parse("parecido com   "), Intent::Recommend(None));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Intent::parse("olá"), Intent::Unknown);
        assert_eq!(Intent::parse(""), Intent::Unknown);
    }
}
