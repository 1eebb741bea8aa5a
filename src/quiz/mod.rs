pub mod item;
pub mod session;

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::conjugation::{Conjugator, Pronoun, Tense};
use crate::error::{ConjugaError, ListKind, Result};
use crate::lexicon::VerbTable;
use crate::verb::Verb;

pub use item::QuizItem;
pub use session::{Answer, Grade, Question, QuizSession};

/// Upper bound on the number of items in one quiz.
pub const MAX_QUIZ_ITEMS: usize = 50;

/// Size limits for quiz composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOptions {
    /// Largest item count a caller may ask for.
    pub max_items: usize,
    /// How many verbs a random quiz draws from the lexicon.
    pub random_verbs: usize,
    /// Item count of a random quiz when the caller gives none.
    pub random_items: usize,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            max_items: MAX_QUIZ_ITEMS,
            random_verbs: 10,
            random_items: 20,
        }
    }
}

/// A sampled set of quiz items over fixed verb, tense and pronoun lists.
#[derive(Debug, Clone)]
pub struct Quiz {
    verbs: Vec<Verb>,
    tenses: Vec<Tense>,
    pronouns: Vec<Pronoun>,
    num_items: usize,
    quiz_bank: Vec<QuizItem>,
}

impl Quiz {
    /// Composes a quiz with the default limits and the thread RNG.
    pub fn new(
        conjugator: &Conjugator<'_>,
        verbs: Vec<Verb>,
        tenses: Vec<Tense>,
        pronouns: Vec<Pronoun>,
        num_items: Option<usize>,
    ) -> Result<Self> {
        Self::with_rng(
            conjugator,
            verbs,
            tenses,
            pronouns,
            num_items,
            &QuizOptions::default(),
            &mut rand::thread_rng(),
        )
    }

    /// Composes a quiz, sampling with `rng`.
    ///
    /// An explicit `num_items` outside `1..=options.max_items` is rejected.
    /// Within that range it is clamped to the number of combinations. Without
    /// one the quiz takes every combination, up to `options.max_items`.
    pub fn with_rng<R: Rng + ?Sized>(
        conjugator: &Conjugator<'_>,
        verbs: Vec<Verb>,
        tenses: Vec<Tense>,
        pronouns: Vec<Pronoun>,
        num_items: Option<usize>,
        options: &QuizOptions,
        rng: &mut R,
    ) -> Result<Self> {
        if let Some(count) = num_items {
            if !(1..=options.max_items).contains(&count) {
                return Err(ConjugaError::InvalidCount {
                    count,
                    max: options.max_items,
                });
            }
        }

        let verbs = dedup_by(verbs, |a, b| a.key() == b.key());
        let tenses = dedup_by(tenses, |a, b| a == b);
        let pronouns = dedup_by(pronouns, |a, b| a == b);

        let mut quiz_bank = create_quiz_bank(conjugator, &verbs, &tenses, &pronouns)?;
        let total = quiz_bank.len();
        let num_items = match num_items {
            Some(count) => count.min(total),
            None => total.min(options.max_items),
        };
        log::debug!("quiz bank holds {} items, sampling {}", total, num_items);

        // Shuffle then cut: a uniform sample without replacement.
        quiz_bank.shuffle(rng);
        quiz_bank.truncate(num_items);

        Ok(Self {
            verbs,
            tenses,
            pronouns,
            num_items,
            quiz_bank,
        })
    }

    /// Composes a quiz from raw names, as they arrive from a user.
    pub fn from_names<V, T, P, R>(
        conjugator: &Conjugator<'_>,
        verbs: &[V],
        tenses: &[T],
        pronouns: &[P],
        num_items: Option<usize>,
        options: &QuizOptions,
        rng: &mut R,
    ) -> Result<Self>
    where
        V: AsRef<str>,
        T: AsRef<str>,
        P: AsRef<str>,
        R: Rng + ?Sized,
    {
        let verbs = verbs
            .iter()
            .map(|verb| {
                conjugator
                    .verb(verb.as_ref())
                    .map_err(|_| invalid_element(ListKind::Verb, verb.as_ref()))
            })
            .collect::<Result<Vec<_>>>()?;
        let tenses = tenses
            .iter()
            .map(|tense| {
                tense
                    .as_ref()
                    .parse::<Tense>()
                    .map_err(|_| invalid_element(ListKind::Tense, tense.as_ref()))
            })
            .collect::<Result<Vec<_>>>()?;
        let pronouns = pronouns
            .iter()
            .map(|pronoun| {
                pronoun
                    .as_ref()
                    .parse::<Pronoun>()
                    .map_err(|_| invalid_element(ListKind::Pronoun, pronoun.as_ref()))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::with_rng(conjugator, verbs, tenses, pronouns, num_items, options, rng)
    }

    /// A quiz over `options.random_verbs` random verbs from `table`, every
    /// tense and every pronoun. Defaults to `options.random_items` items.
    pub fn random<R: Rng + ?Sized>(
        conjugator: &Conjugator<'_>,
        table: &VerbTable,
        num_items: Option<usize>,
        options: &QuizOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let verbs = table
            .random_verbs(options.random_verbs, rng)
            .into_iter()
            .map(|infinitive| conjugator.verb(infinitive))
            .collect::<Result<Vec<_>>>()?;
        let num_items = num_items.unwrap_or(options.random_items);

        Self::with_rng(
            conjugator,
            verbs,
            Tense::ALL.to_vec(),
            Pronoun::ALL.to_vec(),
            Some(num_items),
            options,
            rng,
        )
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn tenses(&self) -> &[Tense] {
        &self.tenses
    }

    pub fn pronouns(&self) -> &[Pronoun] {
        &self.pronouns
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.quiz_bank
    }

    /// Walks the bank from the first item. Every call starts over.
    pub fn iter(&self) -> std::slice::Iter<'_, QuizItem> {
        self.quiz_bank.iter()
    }

    pub fn len(&self) -> usize {
        self.quiz_bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz_bank.is_empty()
    }

    pub fn into_items(self) -> Vec<QuizItem> {
        self.quiz_bank
    }
}

impl<'a> IntoIterator for &'a Quiz {
    type Item = &'a QuizItem;
    type IntoIter = std::slice::Iter<'a, QuizItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |names: Vec<String>| names.join(", ");
        writeln!(f, "QUIZ:")?;
        writeln!(
            f,
            "Verbs: {}",
            join(self.verbs.iter().map(ToString::to_string).collect())
        )?;
        writeln!(
            f,
            "Tenses: {}",
            join(self.tenses.iter().map(ToString::to_string).collect())
        )?;
        writeln!(
            f,
            "Pronouns: {}",
            join(self.pronouns.iter().map(ToString::to_string).collect())
        )?;
        writeln!(f, "Number of Items: {}", self.num_items)?;
        writeln!(f, "------------")?;
        write!(f, "Quiz Items:")?;
        for item in &self.quiz_bank {
            write!(f, "\n{}", item)?;
        }
        Ok(())
    }
}

/// Composes a quiz and returns its items.
pub fn compose_quiz(
    conjugator: &Conjugator<'_>,
    verbs: &[Verb],
    tenses: &[Tense],
    pronouns: &[Pronoun],
    num_items: Option<usize>,
) -> Result<Vec<QuizItem>> {
    Quiz::new(
        conjugator,
        verbs.to_vec(),
        tenses.to_vec(),
        pronouns.to_vec(),
        num_items,
    )
    .map(Quiz::into_items)
}

/// Every verb × tense × pronoun combination except `yo` with an imperative.
fn create_quiz_bank(
    conjugator: &Conjugator<'_>,
    verbs: &[Verb],
    tenses: &[Tense],
    pronouns: &[Pronoun],
) -> Result<Vec<QuizItem>> {
    let mut quiz_bank = Vec::with_capacity(verbs.len() * tenses.len() * pronouns.len());
    for verb in verbs {
        for &tense in tenses {
            for &pronoun in pronouns {
                if pronoun == Pronoun::Yo && tense.is_imperative() {
                    continue;
                }
                let answer = conjugator.conjugate(verb, tense, pronoun)?;
                quiz_bank.push(QuizItem::new(
                    conjugator,
                    (verb.clone(), tense, pronoun),
                    answer,
                )?);
            }
        }
    }
    Ok(quiz_bank)
}

fn dedup_by<T>(items: Vec<T>, same: impl Fn(&T, &T) -> bool) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|seen| same(seen, &item)) {
            unique.push(item);
        }
    }
    unique
}

fn invalid_element(list: ListKind, value: &str) -> ConjugaError {
    ConjugaError::InvalidList {
        list,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn table() -> VerbTable {
        VerbTable::builtin().expect("bundled lexicon parses")
    }

    fn verbs(conjugator: &Conjugator<'_>, infinitives: &[&str]) -> Vec<Verb> {
        infinitives
            .iter()
            .map(|infinitive| conjugator.verb(infinitive).unwrap())
            .collect()
    }

    #[test]
    fn single_combination_yields_single_item() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let items = compose_quiz(
            &conjugator,
            &verbs(&conjugator, &["hacer"]),
            &[Tense::Present],
            &[Pronoun::Yo],
            None,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer(), "hago");
    }

    #[test]
    fn skips_yo_with_imperatives() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hablar", "ir"]),
            vec![Tense::AffirmativeImperative, Tense::NegativeImperative],
            Pronoun::ALL.to_vec(),
            None,
        )
        .unwrap();
        // 2 verbs × 2 tenses × 5 persons.
        assert_eq!(quiz.len(), 20);
        assert!(quiz.iter().all(|item| item.question_pronoun() != Pronoun::Yo));
    }

    #[test]
    fn only_forbidden_combinations_give_an_empty_quiz() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hablar"]),
            vec![Tense::AffirmativeImperative],
            vec![Pronoun::Yo],
            None,
        )
        .unwrap();
        assert!(quiz.is_empty());
        assert_eq!(quiz.num_items(), 0);
    }

    #[test]
    fn explicit_count_outside_bounds_is_rejected() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        for count in [0, 51, 100] {
            let result = Quiz::new(
                &conjugator,
                verbs(&conjugator, &["hablar"]),
                vec![Tense::Present],
                Pronoun::ALL.to_vec(),
                Some(count),
            );
            assert_eq!(
                result.unwrap_err(),
                ConjugaError::InvalidCount { count, max: 50 }
            );
        }
    }

    #[test]
    fn explicit_count_is_clamped_to_the_bank() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hablar"]),
            vec![Tense::Present],
            Pronoun::ALL.to_vec(),
            Some(40),
        )
        .unwrap();
        assert_eq!(quiz.len(), 6);
        assert_eq!(quiz.num_items(), 6);
    }

    #[test]
    fn unset_count_defaults_to_the_bound() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hablar", "beber", "vivir"]),
            Tense::ALL.to_vec(),
            Pronoun::ALL.to_vec(),
            None,
        )
        .unwrap();
        assert_eq!(quiz.len(), 50);
    }

    #[test]
    fn custom_bound_is_honoured() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let options = QuizOptions {
            max_items: 100,
            ..QuizOptions::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let quiz = Quiz::with_rng(
            &conjugator,
            verbs(&conjugator, &["hablar", "beber"]),
            Tense::ALL.to_vec(),
            Pronoun::ALL.to_vec(),
            Some(100),
            &options,
            &mut rng,
        )
        .unwrap();
        assert_eq!(quiz.len(), 100);
    }

    #[test]
    fn duplicate_inputs_do_not_duplicate_items() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hablar", "HABLAR", "hablar"]),
            vec![Tense::Present, Tense::Present],
            vec![Pronoun::Tu, Pronoun::Tu, Pronoun::Nosotros],
            None,
        )
        .unwrap();
        assert_eq!(quiz.len(), 2);
        let triples: HashSet<_> = quiz
            .iter()
            .map(|item| {
                (
                    item.question_verb().key().to_string(),
                    item.question_tense(),
                    item.question_pronoun(),
                )
            })
            .collect();
        assert_eq!(triples.len(), 2);
    }

    #[test]
    fn same_seed_same_quiz() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Quiz::with_rng(
                &conjugator,
                verbs(&conjugator, &["hablar", "ser", "vivir"]),
                Tense::ALL.to_vec(),
                Pronoun::ALL.to_vec(),
                Some(15),
                &QuizOptions::default(),
                &mut rng,
            )
            .unwrap()
            .into_items()
        };
        assert_eq!(build(42), build(42));
    }

    #[test]
    fn iteration_restarts_from_the_first_item() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["vivir"]),
            vec![Tense::Preterite],
            Pronoun::ALL.to_vec(),
            None,
        )
        .unwrap();
        let first: Vec<_> = quiz.iter().collect();
        let second: Vec<_> = (&quiz).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn from_names_reports_the_bad_list() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let options = QuizOptions::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut from_names = |verbs: &[&str], tenses: &[&str], pronouns: &[&str]| {
            Quiz::from_names(&conjugator, verbs, tenses, pronouns, None, &options, &mut rng)
        };

        let err = from_names(&["hablar", "abcd"], &["present"], &["yo"]).unwrap_err();
        assert_eq!(
            err,
            ConjugaError::InvalidList {
                list: ListKind::Verb,
                value: "abcd".to_string()
            }
        );

        let err = from_names(&["hablar"], &["present", "pasado"], &["yo"]).unwrap_err();
        assert!(matches!(err, ConjugaError::InvalidList { list: ListKind::Tense, .. }));

        let err = from_names(&["hablar"], &["present"], &["usted"]).unwrap_err();
        assert!(matches!(err, ConjugaError::InvalidList { list: ListKind::Pronoun, .. }));

        let quiz = from_names(&["hacer"], &["present"], &["yo"]).unwrap();
        assert_eq!(quiz.items()[0].answer(), "hago");
    }

    #[test]
    fn random_quiz_uses_the_default_size() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let options = QuizOptions::default();

        let quiz = Quiz::random(&conjugator, &table, None, &options, &mut rng).unwrap();
        assert_eq!(quiz.len(), 20);
        assert_eq!(quiz.verbs().len(), 10);
        assert_eq!(quiz.tenses().len(), 18);

        let err = Quiz::random(&conjugator, &table, Some(0), &options, &mut rng).unwrap_err();
        assert_eq!(err, ConjugaError::InvalidCount { count: 0, max: 50 });
    }

    #[test]
    fn display_lists_inputs_and_items() {
        let table = table();
        let conjugator = Conjugator::new(&table);
        let quiz = Quiz::new(
            &conjugator,
            verbs(&conjugator, &["hacer"]),
            vec![Tense::Present],
            vec![Pronoun::Yo],
            None,
        )
        .unwrap();
        assert_eq!(
            quiz.to_string(),
            "QUIZ:\nVerbs: Verb: hacer\nTenses: present\nPronouns: yo\nNumber of Items: 1\n\
             ------------\nQuiz Items:\nQuestion: yo hacer (present)\nAnswer: hago"
        );
    }
}
