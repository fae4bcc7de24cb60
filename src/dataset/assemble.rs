/*!
Assembly of the options of a multiple choice sample.

The correct answer and three distractors are shuffled, and the index of the correct answer after the shuffle is recorded.

- Fewer than three distractors is an error, and the sample should be dropped (not padded).
- Beyond three, only the first three distractors are used.
- A distractor identical to the correct answer is an error, as the correct option would be ambiguous.

```rust
# use logicbench::dataset::assemble;
# use rand::{rngs::StdRng, SeedableRng};
let mut rng = StdRng::seed_from_u64(0);
let distractors = ["chove", "as ruas estão secas", "ninguém sabe"];

let assembly = assemble("não chove", &distractors, &mut rng).unwrap();
assert_eq!(assembly.options.len(), 4);
assert_eq!(assembly.options[assembly.answer_index], "não chove");
```
*/

use rand::seq::SliceRandom;

use crate::types::err::{self};

/// The count of distractors in each sample.
pub const DISTRACTOR_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    pub options: Vec<String>,
    pub answer_index: usize,
}

pub fn assemble<S: AsRef<str>>(
    correct: &str,
    distractors: &[S],
    rng: &mut impl rand::Rng,
) -> Result<Assembly, err::AssemblyError> {
    if distractors.len() < DISTRACTOR_COUNT {
        return Err(err::AssemblyError::InsufficientDistractors(distractors.len()));
    }

    let distractors = &distractors[..DISTRACTOR_COUNT];
    if let Some(position) = distractors.iter().position(|d| d.as_ref() == correct) {
        return Err(err::AssemblyError::DuplicateOfCorrect(position));
    }

    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(correct.to_string());
    options.extend(distractors.iter().map(|d| d.as_ref().to_string()));
    options.shuffle(rng);

    let answer_index = options
        .iter()
        .position(|option| option == correct)
        .ok_or(err::AssemblyError::DuplicateOfCorrect(0))?;

    Ok(Assembly {
        options,
        answer_index,
    })
}

/// The non-empty lines of `text`, with any list marker (`-`, `*`, `1.`, `1)`) removed.
pub fn parse_distractor_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix(['-', '*', '•']) {
        return rest.trim_start();
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
    }

    line
}

#[cfg(test)]
mod assemble_tests {
    use super::*;

    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn every_option_appears_once() {
        let distractors = ["a", "b", "c"];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assembly = assemble("correct", &distractors, &mut rng).unwrap();

            assert_eq!(assembly.options.len(), 4);
            assert_eq!(assembly.options[assembly.answer_index], "correct");

            let mut sorted = assembly.options.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["a", "b", "c", "correct"]);
        }
    }

    #[test]
    fn too_few_distractors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            assemble("correct", &["a", "b"], &mut rng),
            Err(err::AssemblyError::InsufficientDistractors(2))
        );
    }

    #[test]
    fn extra_distractors_are_ignored() {
        let mut rng = StdRng::seed_from_u64(0);
        let assembly = assemble("correct", &["a", "b", "c", "d"], &mut rng).unwrap();
        assert!(!assembly.options.iter().any(|option| option == "d"));
    }

    #[test]
    fn duplicates_of_the_correct_answer() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            assemble("correct", &["a", "correct", "c"], &mut rng),
            Err(err::AssemblyError::DuplicateOfCorrect(1))
        );
    }

    #[test]
    fn list_markers() {
        let text = "Aqui estão:\n- o gato dorme\n* o cão late\n\n3. a ave canta\n4) o peixe nada\n";
        assert_eq!(
            parse_distractor_lines(text),
            vec!["Aqui estão:", "o gato dorme", "o cão late", "a ave canta", "o peixe nada"]
        );
    }
}
