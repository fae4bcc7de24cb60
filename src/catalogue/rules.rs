//! The rules of the catalogue.
//!
//! Negated placeholders (`{not q}`) are filled by [back-fill](crate::template::SentenceBank::backfill_negations) when absent from a sentence bank.

use super::{Formalization, QuestionTemplate, RuleDefinition};

use super::LogicFamily::{FirstOrder, NonMonotonic, Propositional};

pub(super) static RULES: &[RuleDefinition] = &[
    // ((p → q) ∧ ¬q) ⊢ ¬p
    RuleDefinition {
        family: Propositional,
        name: "Modus_Tollens",
        premise_template: "Se {p}, então {q}. Sabe-se que {not q}.",
        conclusion_template: "{not p}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que '{not p}'?", "Podemos inferir que '{not p}'?"],
                answer: true,
                formal: Some("Not(p)"),
            },
            QuestionTemplate {
                variants: &["Isso implica que '{p}'?", "Podemos inferir que '{p}'?"],
                answer: false,
                formal: Some("p"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "Not(q)"],
            conclusion: "Not(p)",
        }),
    },
    // ((p → q) ∧ p) ⊢ q
    RuleDefinition {
        family: Propositional,
        name: "Modus_Ponens",
        premise_template: "Se {p}, então {q}. Sabe-se que {p}.",
        conclusion_template: "{q}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que '{q}'?", "Podemos inferir que '{q}'?"],
                answer: true,
                formal: Some("q"),
            },
            QuestionTemplate {
                variants: &["Isso implica que '{not q}'?", "Podemos inferir que '{not q}'?"],
                answer: false,
                formal: Some("Not(q)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "p"],
            conclusion: "q",
        }),
    },
    // ((p → q) ∧ (q → r)) ⊢ (p → r)
    RuleDefinition {
        family: Propositional,
        name: "Hypothetical_Syllogism",
        premise_template: "Se {p}, então {q}. Se {q}, então {r}.",
        conclusion_template: "Se {p}, então {r}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Se {p}, isso significa que {r}?"],
                answer: true,
                formal: Some("Implies(p, r)"),
            },
            QuestionTemplate {
                variants: &["Se {p}, isso significa que {not r}?"],
                answer: false,
                formal: Some("Implies(p, Not(r))"),
            },
            QuestionTemplate {
                variants: &["Se {not p}, isso significa que {not r}?"],
                answer: false,
                formal: Some("Implies(Not(p), Not(r))"),
            },
            QuestionTemplate {
                variants: &["Se {not p}, isso significa que {r}?"],
                answer: false,
                formal: Some("Implies(Not(p), r)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "Implies(q, r)"],
            conclusion: "Implies(p, r)",
        }),
    },
    // ((p ∨ q) ∧ ¬p) ⊢ q
    RuleDefinition {
        family: Propositional,
        name: "Disjunctive_Syllogism",
        premise_template: "Sabe-se que {p} ou {q}. Também se sabe que {not p}.",
        conclusion_template: "{q}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que '{q}'?"],
                answer: true,
                formal: Some("q"),
            },
            QuestionTemplate {
                variants: &["Isso implica que '{not q}'?"],
                answer: false,
                formal: Some("Not(q)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Or(p, q)", "Not(p)"],
            conclusion: "q",
        }),
    },
    // ((p → q) ∧ (r → s) ∧ (p ∨ r)) ⊢ (q ∨ s)
    RuleDefinition {
        family: Propositional,
        name: "Constructive_Dilemma",
        premise_template: "Se {p}, então {q}. Se {r}, então {s}. Sabe-se que {p} ou {r}.",
        conclusion_template: "{q} ou {s}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {q} (b) {s}"],
                answer: true,
                formal: Some("Or(q, s)"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not q} (b) {not s}"],
                answer: false,
                formal: Some("Or(Not(q), Not(s))"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {q} (b) {not s}"],
                answer: false,
                formal: Some("Or(q, Not(s))"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not q} (b) {s}"],
                answer: false,
                formal: Some("Or(Not(q), s)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "Implies(r, s)", "Or(p, r)"],
            conclusion: "Or(q, s)",
        }),
    },
    // ((p → q) ∧ (r → s) ∧ (¬q ∨ ¬s)) ⊢ (¬p ∨ ¬r)
    RuleDefinition {
        family: Propositional,
        name: "Destructive_Dilemma",
        premise_template: "Se {p}, então {q}. Se {r}, então {s}. Sabe-se que {not q} ou {not s}.",
        conclusion_template: "{not p} ou {not r}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not p} (b) {not r}"],
                answer: true,
                formal: Some("Or(Not(p), Not(r))"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {p} (b) {r}"],
                answer: false,
                formal: Some("Or(p, r)"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not p} (b) {r}"],
                answer: false,
                formal: Some("Or(Not(p), r)"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {p} (b) {not r}"],
                answer: false,
                formal: Some("Or(p, Not(r))"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "Implies(r, s)", "Or(Not(q), Not(s))"],
            conclusion: "Or(Not(p), Not(r))",
        }),
    },
    // ((p → q) ∧ (r → s) ∧ (p ∨ ¬s)) ⊢ (q ∨ ¬r)
    RuleDefinition {
        family: Propositional,
        name: "Bidirectional_Dilemma",
        premise_template: "Se {p}, então {q}. Se {r}, então {s}. Sabe-se que {p} ou {not s}.",
        conclusion_template: "{q} ou {not r}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {q} (b) {not r}"],
                answer: true,
                formal: Some("Or(q, Not(r))"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not q} (b) {r}"],
                answer: false,
                formal: Some("Or(Not(q), r)"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {q} (b) {r}"],
                answer: false,
                formal: Some("Or(q, r)"),
            },
            QuestionTemplate {
                variants: &["Podemos dizer que pelo menos um dos seguintes deve ser sempre verdadeiro? (a) {not q} (b) {not r}"],
                answer: false,
                formal: Some("Or(Not(q), Not(r))"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)", "Implies(r, s)", "Or(p, Not(s))"],
            conclusion: "Or(q, Not(r))",
        }),
    },
    // (p ∨ q) ⊢ (q ∨ p)
    RuleDefinition {
        family: Propositional,
        name: "Commutation",
        premise_template: "Sabe-se que {p} ou {q}.",
        conclusion_template: "{q} ou {p}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que '{q} ou {p}'?"],
                answer: true,
                formal: Some("Or(q, p)"),
            },
            QuestionTemplate {
                variants: &["Isso implica que '{not q} ou {p}'?"],
                answer: false,
                formal: Some("Or(Not(q), p)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Or(p, q)"],
            conclusion: "Or(q, p)",
        }),
    },
    // (p → q) ⊢ (¬p ∨ q)
    RuleDefinition {
        family: Propositional,
        name: "Material_Implication",
        premise_template: "Se {p}, então {q}.",
        conclusion_template: "{not p} ou {q}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que '{not p} ou {q}'?"],
                answer: true,
                formal: Some("Or(Not(p), q)"),
            },
            QuestionTemplate {
                variants: &["Isso implica que '{p} e {not q}'?"],
                answer: false,
                formal: Some("And(p, Not(q))"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p, q)"],
            conclusion: "Or(Not(p), q)",
        }),
    },
    // ∀x (K(x) → P(x)), K(a) ⊢ P(a)
    RuleDefinition {
        family: FirstOrder,
        name: "Universal_Instantiation",
        premise_template: "Todos os {entidades_plural} são {propriedade}. {a} é um {entidade_singular}.",
        conclusion_template: "{a} é {propriedade}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que {a} é {propriedade}?", "Podemos inferir que {a} é {propriedade}?"],
                answer: true,
                formal: Some("prop_a"),
            },
            QuestionTemplate {
                variants: &["Isso implica que {a} não é {propriedade}?", "Podemos inferir que {a} não é {propriedade}?"],
                answer: false,
                formal: Some("Not(prop_a)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(kind_a, prop_a)", "kind_a"],
            conclusion: "prop_a",
        }),
    },
    // ∀x ((K(x) ∧ P(x)) → Q(x)), K(a), P(a) ⊢ Q(a)
    RuleDefinition {
        family: FirstOrder,
        name: "Modus_Ponens_FOL",
        premise_template: "Se algum dos {entidades_plural} {propriedade_p}, então ele {propriedade_q}. {a} é um dos {entidades_plural} e {propriedade_p}.",
        conclusion_template: "{a} {propriedade_q}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que {a} {propriedade_q}?"],
                answer: true,
                formal: Some("q_a"),
            },
            QuestionTemplate {
                variants: &["Isso implica que {a} {not propriedade_q}?"],
                answer: false,
                formal: Some("Not(q_a)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(And(kind_a, p_a), q_a)", "kind_a", "p_a"],
            conclusion: "q_a",
        }),
    },
    // ∀x ((K(x) ∧ P(x)) → Q(x)), K(a), ¬Q(a) ⊢ ¬P(a)
    RuleDefinition {
        family: FirstOrder,
        name: "Modus_Tollens_FOL",
        premise_template: "Se algum dos {entidades_plural} {propriedade_p}, então ele {propriedade_q}. {a} é um dos {entidades_plural} e {not propriedade_q}.",
        conclusion_template: "{a} {not propriedade_p}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que {a} {not propriedade_p}?"],
                answer: true,
                formal: Some("Not(p_a)"),
            },
            QuestionTemplate {
                variants: &["Isso implica que {a} {propriedade_p}?"],
                answer: false,
                formal: Some("p_a"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(And(kind_a, p_a), q_a)", "kind_a", "Not(q_a)"],
            conclusion: "Not(p_a)",
        }),
    },
    // ∀x (K(x) → (P(x) ∨ Q(x))), K(a), ¬P(a) ⊢ Q(a)
    RuleDefinition {
        family: FirstOrder,
        name: "Disjunctive_Syllogism_FOL",
        premise_template: "Todo {entidade_singular} {propriedade_p} ou {propriedade_q}. {a} é um {entidade_singular} e {not propriedade_p}.",
        conclusion_template: "{a} {propriedade_q}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Isso implica que {a} {propriedade_q}?"],
                answer: true,
                formal: Some("q_a"),
            },
            QuestionTemplate {
                variants: &["Isso implica que {a} {not propriedade_q}?"],
                answer: false,
                formal: Some("Not(q_a)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(kind_a, Or(p_a, q_a))", "kind_a", "Not(p_a)"],
            conclusion: "q_a",
        }),
    },
    // ∀x (P(x) → Q(x)), ∀x (Q(x) → R(x)) ⊢ ∀x (P(x) → R(x)), for an arbitrary x
    RuleDefinition {
        family: FirstOrder,
        name: "Hypothetical_Syllogism_FOL",
        premise_template: "Se um {entidade_singular} {propriedade_p}, então ele {propriedade_q}. Se um {entidade_singular} {propriedade_q}, então ele {propriedade_r}.",
        conclusion_template: "Se um {entidade_singular} {propriedade_p}, então ele {propriedade_r}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Se um {entidade_singular} {propriedade_p}, isso significa que ele {propriedade_r}?"],
                answer: true,
                formal: Some("Implies(p_x, r_x)"),
            },
            QuestionTemplate {
                variants: &["Se um {entidade_singular} {propriedade_r}, isso significa que ele {propriedade_p}?"],
                answer: false,
                formal: Some("Implies(r_x, p_x)"),
            },
        ],
        formalization: Some(Formalization {
            premises: &["Implies(p_x, q_x)", "Implies(q_x, r_x)"],
            conclusion: "Implies(p_x, r_x)",
        }),
    },
    RuleDefinition {
        family: NonMonotonic,
        name: "Default_Reasoning_Irrelevant_Info",
        premise_template: "Normalmente, {Coisas} {propriedade}. {x} é um {Coisa}. {x} é {propriedade_irrelevante}.",
        conclusion_template: "{x} {propriedade}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Podemos concluir que {x} {propriedade}?"],
                answer: true,
                formal: None,
            },
            QuestionTemplate {
                variants: &["Podemos concluir que {x} {not propriedade}?"],
                answer: false,
                formal: None,
            },
        ],
        formalization: None,
    },
    RuleDefinition {
        family: NonMonotonic,
        name: "Reasoning_About_Priorities",
        premise_template: "{fonte1} afirma que {p}. {fonte2} afirma que {not p}. {fonte1} é mais confiável do que {fonte2}.",
        conclusion_template: "{p}",
        question_templates: &[
            QuestionTemplate {
                variants: &["Podemos concluir que {p}?"],
                answer: true,
                formal: None,
            },
            QuestionTemplate {
                variants: &["Podemos concluir que {not p}?"],
                answer: false,
                formal: None,
            },
        ],
        formalization: None,
    },
];
