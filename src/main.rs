use std::sync::Arc;

use conjuga_bot::{
    config::BotConfig,
    quiz::{Quiz, QuizSession},
    Conjugator, Pronoun, Tense, VerbTable,
};
use dotenv::dotenv;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type DialogueStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveGameChoice,
    ReceiveVerbs,
    ReceiveTenses {
        verbs: Vec<String>,
    },
    ReceiveAmountOfQuestions {
        verbs: Vec<String>,
        tenses: Vec<Tense>,
    },
    RandomQuizReceiveAmountOfQuestions,
    ConjugationQuiz {
        session: QuizSession,
        question_number: usize,
        score: usize,
    },
    ReceiveTableVerb,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting conjugation bot...");

    let config = match BotConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            return;
        }
    };

    let verbs = match config.load_verbs() {
        Ok(verbs) => Arc::new(verbs),
        Err(err) => {
            log::error!("Failed to load the verb list: {}", err);
            return;
        }
    };

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.database_path);
    let storage: DialogueStorage = match SqliteStorage::open(&config.database_path, Json).await {
        Ok(storage) => storage.erase(),
        Err(err) => {
            log::error!("Failed to open {}: {}", config.database_path, err);
            return;
        }
    };

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveGameChoice].endpoint(receive_game_choice))
            .branch(dptree::case![State::ReceiveVerbs].endpoint(receive_verbs))
            .branch(dptree::case![State::ReceiveTenses { verbs }].endpoint(receive_tenses))
            .branch(
                dptree::case![State::ReceiveAmountOfQuestions { verbs, tenses }]
                    .endpoint(receive_amount_of_questions),
            )
            .branch(
                dptree::case![State::RandomQuizReceiveAmountOfQuestions]
                    .endpoint(random_quiz_receive_amount_of_questions),
            )
            .branch(
                dptree::case![State::ConjugationQuiz {
                    session,
                    question_number,
                    score
                }]
                .endpoint(conjugation_quiz),
            )
            .branch(dptree::case![State::ReceiveTableVerb].endpoint(receive_table_verb)),
    )
    .dependencies(dptree::deps![storage, verbs, config])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const QUIZ_BY_VERBS: &str = "Quiz por verbos";
const RANDOM_QUIZ: &str = "Quiz aleatorio";
const CONJUGATION_TABLE: &str = "Tabla de conjugación";
const ALL_TENSES: &str = "todos";
const START_QUIZ: &str = "¡Vamos!";

fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(QUIZ_BY_VERBS), KeyboardButton::new(RANDOM_QUIZ)],
        vec![KeyboardButton::new(CONJUGATION_TABLE)],
    ])
}

fn amount_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new("5")],
        vec![KeyboardButton::new("10")],
        vec![KeyboardButton::new("15")],
    ])
}

fn tense_keyboard() -> KeyboardMarkup {
    let mut rows = vec![vec![KeyboardButton::new(ALL_TENSES)]];
    rows.extend(
        Tense::ALL
            .chunks(2)
            .map(|pair| pair.iter().map(|tense| KeyboardButton::new(tense.label())).collect()),
    );
    KeyboardMarkup::new(rows)
}

const GREETING_TEXT: &str = "¡Hola! Soy un bot de conjugación. Te ayudaré a practicar los verbos en español. ¿Qué quieres hacer?";
async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(menu_keyboard())
        .await?;

    dialogue.update(State::ReceiveGameChoice).await?;
    Ok(())
}

async fn receive_game_choice(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    match msg.text() {
        Some(QUIZ_BY_VERBS) => {
            bot.send_message(
                msg.chat.id,
                "Escribe los verbos que quieres practicar, separados por comas (por ejemplo: hablar, ser, ir)",
            )
            .reply_markup(KeyboardRemove::new())
            .await?;
            dialogue.update(State::ReceiveVerbs).await?;
        }
        Some(RANDOM_QUIZ) => {
            bot.send_message(msg.chat.id, "Elige el número de preguntas")
                .reply_markup(amount_keyboard())
                .await?;
            dialogue
                .update(State::RandomQuizReceiveAmountOfQuestions)
                .await?;
        }
        Some(CONJUGATION_TABLE) => {
            bot.send_message(msg.chat.id, "¿Qué verbo quieres conjugar?")
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue.update(State::ReceiveTableVerb).await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Por favor, elige una de las opciones")
                .reply_markup(menu_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn receive_verbs(
    bot: Bot,
    dialogue: QuizDialogue,
    verbs: Arc<VerbTable>,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Por favor, escribe los verbos como texto")
            .await?;
        return Ok(());
    };

    let conjugator = Conjugator::new(verbs.as_ref());
    let names = split_list(text);
    let unknown: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| conjugator.verb(name).is_err())
        .collect();

    if names.is_empty() {
        bot.send_message(msg.chat.id, "Escribe al menos un verbo").await?;
        return Ok(());
    }
    if !unknown.is_empty() {
        bot.send_message(
            msg.chat.id,
            format!(
                "No conozco estos verbos: {}. Inténtalo de nuevo",
                unknown.join(", ")
            ),
        )
        .await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        "¿Qué tiempos? Elige uno, escribe varios separados por comas, o pulsa «todos»",
    )
    .reply_markup(tense_keyboard())
    .await?;

    dialogue
        .update(State::ReceiveTenses {
            verbs: names.into_iter().map(str::to_string).collect(),
        })
        .await?;
    Ok(())
}

async fn receive_tenses(
    bot: Bot,
    dialogue: QuizDialogue,
    verbs: Vec<String>,
    msg: Message,
) -> HandlerResult {
    let tenses = msg.text().and_then(parse_tenses);
    let Some(tenses) = tenses else {
        bot.send_message(msg.chat.id, "Por favor, elige un tiempo del teclado")
            .reply_markup(tense_keyboard())
            .await?;
        return Ok(());
    };

    bot.send_message(msg.chat.id, "Elige el número de preguntas")
        .reply_markup(amount_keyboard())
        .await?;

    dialogue
        .update(State::ReceiveAmountOfQuestions { verbs, tenses })
        .await?;
    Ok(())
}

async fn receive_amount_of_questions(
    bot: Bot,
    dialogue: QuizDialogue,
    (verbs, tenses): (Vec<String>, Vec<Tense>),
    table: Arc<VerbTable>,
    config: Arc<BotConfig>,
    msg: Message,
) -> HandlerResult {
    let Some(amount) = parse_amount(&msg, config.as_ref()) else {
        bot.send_message(
            msg.chat.id,
            format!("Por favor, escribe un número entre 1 y {}", config.quiz.max_items),
        )
        .await?;
        return Ok(());
    };

    let conjugator = Conjugator::new(table.as_ref());
    let tense_names: Vec<&str> = tenses.iter().map(|tense| tense.name()).collect();
    let pronoun_names: Vec<&str> = Pronoun::ALL.iter().map(|pronoun| pronoun.name()).collect();

    // ThreadRng is not Send, keep it out of the awaits below.
    let session = {
        let mut rng = rand::thread_rng();
        Quiz::from_names(
            &conjugator,
            verbs.as_slice(),
            tense_names.as_slice(),
            pronoun_names.as_slice(),
            Some(amount),
            &config.quiz,
            &mut rng,
        )
        .map(|quiz| QuizSession::from_quiz(&conjugator, &quiz, &mut rng))
    };

    begin_quiz(bot, dialogue, msg, session).await
}

async fn random_quiz_receive_amount_of_questions(
    bot: Bot,
    dialogue: QuizDialogue,
    table: Arc<VerbTable>,
    config: Arc<BotConfig>,
    msg: Message,
) -> HandlerResult {
    let Some(amount) = parse_amount(&msg, config.as_ref()) else {
        bot.send_message(
            msg.chat.id,
            format!("Por favor, escribe un número entre 1 y {}", config.quiz.max_items),
        )
        .await?;
        return Ok(());
    };

    let conjugator = Conjugator::new(table.as_ref());
    let session = {
        let mut rng = rand::thread_rng();
        Quiz::random(&conjugator, table.as_ref(), Some(amount), &config.quiz, &mut rng)
            .map(|quiz| QuizSession::from_quiz(&conjugator, &quiz, &mut rng))
    };

    begin_quiz(bot, dialogue, msg, session).await
}

async fn begin_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    session: conjuga_bot::Result<QuizSession>,
) -> HandlerResult {
    let session = match session {
        Ok(session) if !session.is_empty() => session,
        Ok(_) => {
            bot.send_message(msg.chat.id, "No hay preguntas para esa combinación")
                .reply_markup(menu_keyboard())
                .await?;
            dialogue.update(State::ReceiveGameChoice).await?;
            return Ok(());
        }
        Err(err) => {
            log::warn!("Could not compose a quiz: {}", err);
            bot.send_message(msg.chat.id, "No he podido crear el quiz, inténtalo otra vez")
                .reply_markup(menu_keyboard())
                .await?;
            dialogue.update(State::ReceiveGameChoice).await?;
            return Ok(());
        }
    };
    log::info!("Chat {} starts a quiz of {} questions", msg.chat.id.0, session.len());

    bot.send_message(msg.chat.id, "¡Genial! Empecemos")
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(START_QUIZ)]]))
        .await?;

    dialogue
        .update(State::ConjugationQuiz {
            session,
            question_number: 0,
            score: 0,
        })
        .await?;
    Ok(())
}

const OUTDATED_QUIZ_TEXT: &str =
    "Este quiz ya no está al día con la lista de verbos. ¿Qué quieres hacer ahora?";
async fn conjugation_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    (session, question_number, score): (QuizSession, usize, usize),
    table: Arc<VerbTable>,
    msg: Message,
) -> HandlerResult {
    let mut current_score = score;
    if question_number != 0 {
        let Some(reply) = msg.text() else {
            bot.send_message(msg.chat.id, "Por favor, responde con texto")
                .await?;
            return Ok(());
        };
        let question = &session.questions[question_number - 1];
        let grade = question.grade(&Conjugator::new(table.as_ref()), reply);

        match grade {
            Ok(grade) if grade.is_correct => {
                bot.send_message(msg.chat.id, "¡Correcto!").await?;
                current_score += 1;
            }
            Ok(grade) => {
                bot.send_message(
                    msg.chat.id,
                    format!("Incorrecto. La respuesta correcta es <b>{}</b>", grade.answer),
                )
                .parse_mode(ParseMode::Html)
                .await?;
            }
            Err(err) => {
                log::warn!("Dropping an outdated quiz in chat {}: {}", msg.chat.id.0, err);
                bot.send_message(msg.chat.id, OUTDATED_QUIZ_TEXT)
                    .reply_markup(menu_keyboard())
                    .await?;
                dialogue.update(State::ReceiveGameChoice).await?;
                return Ok(());
            }
        }
    }

    if question_number >= session.len() {
        let quiz_score = format!(
            "¡Se acabó el quiz! Has acertado {} de {} preguntas\n¿Qué quieres hacer ahora?",
            current_score,
            session.len()
        );
        bot.send_message(msg.chat.id, quiz_score)
            .reply_markup(menu_keyboard())
            .await?;

        dialogue.update(State::ReceiveGameChoice).await?;
        return Ok(());
    }

    let question = &session.questions[question_number];
    let question_text = format!("Pregunta nº{}:\n{}", question_number + 1, question.text);

    bot.send_message(msg.chat.id, question_text)
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(
            question
                .answers
                .iter()
                .map(|a| vec![KeyboardButton::new(a.text.clone())])
                .collect::<Vec<_>>(),
        ))
        .await?;

    dialogue
        .update(State::ConjugationQuiz {
            session,
            question_number: question_number + 1,
            score: current_score,
        })
        .await?;
    Ok(())
}

async fn receive_table_verb(
    bot: Bot,
    dialogue: QuizDialogue,
    table: Arc<VerbTable>,
    msg: Message,
) -> HandlerResult {
    let conjugator = Conjugator::new(table.as_ref());
    let verb = match msg.text().map(|text| conjugator.verb(text.trim())) {
        Some(Ok(verb)) => verb,
        _ => {
            bot.send_message(msg.chat.id, "No conozco ese verbo. Inténtalo de nuevo")
                .await?;
            return Ok(());
        }
    };

    let conjugations = conjugator.table(&verb);
    // Two messages keep each one under Telegram's length limit.
    for compound in [false, true] {
        let text = conjugations
            .rows
            .iter()
            .filter(|row| row.tense.is_compound() == compound)
            .map(|row| {
                let forms = Pronoun::ALL
                    .iter()
                    .zip(&row.forms)
                    .map(|(pronoun, form)| {
                        format!("{}: {}", pronoun, form.as_deref().unwrap_or("-"))
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("<b>{}</b>\n{}", row.tense.label(), forms)
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        bot.send_message(msg.chat.id, format!("<i>{}</i>\n\n{}", conjugations.infinitive, text))
            .parse_mode(ParseMode::Html)
            .await?;
    }

    bot.send_message(msg.chat.id, "¿Qué quieres hacer ahora?")
        .reply_markup(menu_keyboard())
        .await?;
    dialogue.update(State::ReceiveGameChoice).await?;
    Ok(())
}

fn split_list(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_tenses(text: &str) -> Option<Vec<Tense>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case(ALL_TENSES) {
        return Some(Tense::ALL.to_vec());
    }
    let tenses = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Tense::ALL
                .into_iter()
                .find(|tense| tense.label().eq_ignore_ascii_case(part) || tense.name() == part)
        })
        .collect::<Option<Vec<_>>>()?;
    (!tenses.is_empty()).then_some(tenses)
}

fn parse_amount(msg: &Message, config: &BotConfig) -> Option<usize> {
    let amount = msg.text()?.trim().parse::<usize>().ok()?;
    (1..=config.quiz.max_items).contains(&amount).then_some(amount)
}
