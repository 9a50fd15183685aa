use crate::libtane::error::Error;
use crate::libtane::sql::{InsertStatement, SqlValue};
use log::{debug, info};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

pub const QUIZ_TABLE: &str = "public.quiz";
pub const QUIZ_HEADER: &str = "Migration to use per-question types";
pub const SYSTEM_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ImageMcq,
    SignMcq,
    SignLive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub title: String,
    pub difficulty: Difficulty,
    pub q_type: QuestionType,
}

impl QuizConfig {
    pub fn new(title: &str, difficulty: Difficulty, q_type: QuestionType) -> Self {
        Self {
            title: title.to_string(),
            difficulty,
            q_type,
        }
    }
}

pub fn default_quiz_configs() -> Vec<QuizConfig> {
    use Difficulty::Easy;
    use QuestionType::{ImageMcq, SignMcq};
    vec![
        QuizConfig::new("Number Quiz 1", Easy, ImageMcq),
        QuizConfig::new("Number Quiz 2", Easy, ImageMcq),
        QuizConfig::new("Alpha Mix", Easy, ImageMcq),
        QuizConfig::new("Sign Matcher 1", Easy, SignMcq),
        QuizConfig::new("Sign Matcher 2", Easy, SignMcq),
        QuizConfig::new("Foundational Mix", Easy, SignMcq),
    ]
}

/// One multiple-choice question as stored in `quiz.content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q_no")]
    pub number: u32,
    pub q_type: QuestionType,
    #[serde(rename = "q_text")]
    pub prompt_text: String,
    pub q_gloss_id: u32,
    pub options: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizContent {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub content: QuizContent,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct QuizSettings {
    /// Gloss ids `1..=gloss_pool_size` are assumed to exist already.
    pub gloss_pool_size: u32,
    pub question_count: usize,
    pub options_count: usize,
    pub prompt_text: String,
    pub description: String,
    pub created_by: String,
    pub configs: Vec<QuizConfig>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            gloss_pool_size: 35,
            question_count: 6,
            options_count: 4,
            prompt_text: String::from("Identify the correct sign"),
            description: String::from("Practice session"),
            created_by: String::from(SYSTEM_ADMIN_ID),
            configs: default_quiz_configs(),
        }
    }
}

impl QuizSettings {
    pub fn gloss_ids(&self) -> Vec<u32> {
        (1..=self.gloss_pool_size).collect()
    }

    fn check_pool(&self, pool: &[u32]) -> Result<(), Error> {
        if self.question_count == 0 {
            return Err(Error::NoQuestions);
        }
        if self.options_count < 2 {
            return Err(Error::TooFewOptions(self.options_count));
        }
        if pool.len() < self.question_count {
            return Err(Error::PoolTooSmall {
                pool: pool.len(),
                wanted: self.question_count,
            });
        }
        // distractors come from the pool minus the correct id
        let distractors = self.options_count - 1;
        if pool.len() - 1 < distractors {
            return Err(Error::PoolTooSmall {
                pool: pool.len() - 1,
                wanted: distractors,
            });
        }
        Ok(())
    }
}

pub fn generate_questions<R: Rng + ?Sized>(
    settings: &QuizSettings,
    q_type: QuestionType,
    rng: &mut R,
) -> Result<Vec<Question>, Error> {
    let pool = settings.gloss_ids();
    settings.check_pool(&pool)?;

    let subjects = index::sample(rng, pool.len(), settings.question_count);

    let mut questions = Vec::with_capacity(settings.question_count);
    for (idx, subject) in subjects.into_iter().enumerate() {
        let gloss_id = pool[subject];
        // indices past the subject shift by one so it is never drawn again
        let mut options: Vec<u32> =
            index::sample(rng, pool.len() - 1, settings.options_count - 1)
                .into_iter()
                .map(|i| if i >= subject { pool[i + 1] } else { pool[i] })
                .collect();
        options.push(gloss_id);
        options.shuffle(rng);

        questions.push(Question {
            number: idx as u32 + 1,
            q_type,
            prompt_text: settings.prompt_text.clone(),
            q_gloss_id: gloss_id,
            options,
        });
    }
    Ok(questions)
}

pub fn generate_quizzes<R: Rng + ?Sized>(
    settings: &QuizSettings,
    rng: &mut R,
) -> Result<Vec<Quiz>, Error> {
    let now = Instant::now();
    let mut quizzes = Vec::with_capacity(settings.configs.len());
    for config in &settings.configs {
        let questions = generate_questions(settings, config.q_type, rng)?;
        debug!(
            "[Quizzes] '{}': subjects {:?}",
            config.title,
            questions.iter().map(|q| q.q_gloss_id).collect::<Vec<_>>()
        );
        quizzes.push(Quiz {
            title: config.title.clone(),
            description: settings.description.clone(),
            difficulty: config.difficulty,
            content: QuizContent { questions },
            created_by: settings.created_by.clone(),
        });
    }

    debug!(
        "[Quizzes] Generated {} quizzes in {} µs.",
        quizzes.len(),
        now.elapsed().as_micros()
    );
    Ok(quizzes)
}

pub fn quizzes_statement(quizzes: &[Quiz]) -> Result<InsertStatement, Error> {
    let mut statement = InsertStatement::new(
        QUIZ_HEADER,
        QUIZ_TABLE,
        vec!["title", "description", "difficulty", "content", "created_by"],
    );
    for quiz in quizzes {
        statement.push_row(vec![
            SqlValue::Text(quiz.title.clone()),
            SqlValue::Text(quiz.description.clone()),
            SqlValue::Text(quiz.difficulty.as_str().to_string()),
            SqlValue::Text(content_json(&quiz.content)?),
            SqlValue::Text(quiz.created_by.clone()),
        ]);
    }
    Ok(statement)
}

/// Writes `, ` and `: ` between items, as the app's other JSON fixtures are spaced.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn content_json(content: &QuizContent) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    content.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| Error::Json(serde::ser::Error::custom(err)))
}

/// Reads a JSON array of `{ "title", "difficulty", "q_type" }` objects.
pub fn load_quiz_configs(path: &Path) -> Result<Vec<QuizConfig>, Error> {
    let json = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let configs: Vec<QuizConfig> = serde_json::from_str(json.as_str())?;
    if configs.is_empty() {
        return Err(Error::NoQuizzes);
    }
    info!(
        "[Quizzes] Loaded {} configurations from {:?}",
        configs.len(),
        path
    );
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn assert_question_invariants(question: &Question, pool_size: u32) {
        assert_eq!(question.options.len(), 4);
        let distinct: HashSet<u32> = question.options.iter().copied().collect();
        assert_eq!(distinct.len(), 4);
        assert_eq!(
            question
                .options
                .iter()
                .filter(|id| **id == question.q_gloss_id)
                .count(),
            1
        );
        assert!(question.options.iter().all(|id| (1..=pool_size).contains(id)));
    }

    #[test]
    fn questions_hold_structural_invariants() {
        let settings = QuizSettings::default();
        let mut rng = rand::rng();
        for _ in 0..50 {
            let questions = generate_questions(&settings, QuestionType::SignMcq, &mut rng).unwrap();
            assert_eq!(questions.len(), 6);

            let subjects: HashSet<u32> = questions.iter().map(|q| q.q_gloss_id).collect();
            assert_eq!(subjects.len(), 6);

            for (idx, question) in questions.iter().enumerate() {
                assert_eq!(question.number, idx as u32 + 1);
                assert_eq!(question.q_type, QuestionType::SignMcq);
                assert_eq!(question.prompt_text, "Identify the correct sign");
                assert_question_invariants(question, 35);
            }
        }
    }

    #[test]
    fn quizzes_follow_config_order() {
        let settings = QuizSettings::default();
        let quizzes = generate_quizzes(&settings, &mut rand::rng()).unwrap();
        let titles: Vec<&str> = quizzes.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Number Quiz 1",
                "Number Quiz 2",
                "Alpha Mix",
                "Sign Matcher 1",
                "Sign Matcher 2",
                "Foundational Mix"
            ]
        );
        assert!(quizzes.iter().all(|q| q.difficulty == Difficulty::Easy));
        assert!(quizzes.iter().all(|q| q.created_by == SYSTEM_ADMIN_ID));
        assert_eq!(
            quizzes[2].content.questions[0].q_type,
            QuestionType::ImageMcq
        );
        assert_eq!(
            quizzes[3].content.questions[0].q_type,
            QuestionType::SignMcq
        );
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let settings = QuizSettings::default();
        let first = generate_quizzes(&settings, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = generate_quizzes(&settings, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pool_smaller_than_sample_is_an_error() {
        let settings = QuizSettings {
            gloss_pool_size: 5,
            ..QuizSettings::default()
        };
        match generate_questions(&settings, QuestionType::ImageMcq, &mut rand::rng()) {
            Err(Error::PoolTooSmall { pool, wanted }) => {
                assert_eq!(pool, 5);
                assert_eq!(wanted, 6);
            }
            other => panic!("expected PoolTooSmall, got {:?}", other),
        }
    }

    #[test]
    fn pool_without_enough_distractors_is_an_error() {
        let settings = QuizSettings {
            gloss_pool_size: 3,
            question_count: 1,
            ..QuizSettings::default()
        };
        assert!(matches!(
            generate_questions(&settings, QuestionType::ImageMcq, &mut rand::rng()),
            Err(Error::PoolTooSmall { pool: 2, wanted: 3 })
        ));
    }

    #[test]
    fn zero_questions_is_an_error() {
        let settings = QuizSettings {
            question_count: 0,
            ..QuizSettings::default()
        };
        assert!(matches!(
            generate_questions(&settings, QuestionType::ImageMcq, &mut rand::rng()),
            Err(Error::NoQuestions)
        ));
    }

    #[test]
    fn fewer_than_two_options_is_an_error() {
        for options_count in [0, 1] {
            let settings = QuizSettings {
                options_count,
                ..QuizSettings::default()
            };
            match generate_questions(&settings, QuestionType::ImageMcq, &mut rand::rng()) {
                Err(Error::TooFewOptions(count)) => assert_eq!(count, options_count),
                other => panic!("expected TooFewOptions, got {:?}", other),
            }
        }
    }

    #[test]
    fn tight_pool_uses_every_other_id_as_distractor() {
        let settings = QuizSettings {
            gloss_pool_size: 4,
            question_count: 4,
            ..QuizSettings::default()
        };
        let questions =
            generate_questions(&settings, QuestionType::SignMcq, &mut rand::rng()).unwrap();
        for question in &questions {
            let mut options = question.options.clone();
            options.sort();
            assert_eq!(options, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn content_serializes_with_short_keys() {
        let content = QuizContent {
            questions: vec![Question {
                number: 1,
                q_type: QuestionType::ImageMcq,
                prompt_text: "Identify the correct sign".into(),
                q_gloss_id: 12,
                options: vec![3, 12, 30, 7],
            }],
        };
        assert_eq!(
            content_json(&content).unwrap(),
            r#"{"questions": [{"q_no": 1, "q_type": "image_mcq", "q_text": "Identify the correct sign", "q_gloss_id": 12, "options": [3, 12, 30, 7]}]}"#
        );
    }

    #[test]
    fn statement_rows_match_quizzes() {
        let settings = QuizSettings::default();
        let quizzes = generate_quizzes(&settings, &mut StdRng::seed_from_u64(7)).unwrap();
        let statement = quizzes_statement(&quizzes).unwrap();
        assert_eq!(statement.row_count(), 6);

        let rendered = statement.to_string();
        assert!(rendered.starts_with(
            "-- Migration to use per-question types\n\
             INSERT INTO public.quiz (title, description, difficulty, content, created_by) VALUES \n\
             ('Number Quiz 1', 'Practice session', 'EASY', '{\"questions\": [{\"q_no\": 1, "
        ));
        assert!(rendered.ends_with("'00000000-0000-0000-0000-000000000000');"));
    }

    #[test]
    fn configs_deserialize_from_json() {
        let configs: Vec<QuizConfig> = serde_json::from_str(
            r#"[{"title": "Live Round", "difficulty": "HARD", "q_type": "sign_live"}]"#,
        )
        .unwrap();
        assert_eq!(
            configs,
            vec![QuizConfig::new("Live Round", Difficulty::Hard, QuestionType::SignLive)]
        );
    }
}
