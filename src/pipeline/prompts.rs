/*!
Prompts for the generation collaborator.

The sentence-bank prompt of a rule pairs a common frame with guidance for the rule.
Rules without specific guidance ask for a causal relation between `p` and `q`.
*/

use std::collections::BTreeSet;

use crate::catalogue::{LogicFamily, RuleDefinition};

const RAW_JSON_ONLY: &str = "**IMPORTANTE:** Forneça APENAS o array JSON bruto, sem nenhum texto antes ou depois, e sem markdown.";

const CAUSAL: &str = "**Instrução Crucial de Causalidade para cada objeto:** A sentença para a chave 'p' deve descrever uma causa ou condição que levaria de forma plausível e lógica à sentença da chave 'q'. A relação \"Se p, então q\" deve fazer sentido no mundo real. Tente variar os temas entre os objetos no array.";

const CAUSAL_CHAIN: &str = "**Instrução Crucial de Cadeia Causal para cada objeto:** Você deve criar uma cadeia lógica de três eventos: 'p' causa 'q', e 'q' causa 'r'.
**Exemplo:** [{\"p\": \"Eu estudei para a prova.\", \"q\": \"Eu passei na prova.\", \"r\": \"Eu ganhei um presente.\"}]";

const DILEMMAS: &str = "**Instrução Crucial de Alternativas Temáticas para cada objeto:** Cada objeto deve conter dois cenários de causa e efeito (p->q e r->s) que sejam alternativas relacionadas ao mesmo tema.
**Exemplo:** [{\"p\": \"Eu escolho ir à praia\", \"q\": \"Eu vou nadar\", \"r\": \"Eu escolho ir à montanha\", \"s\": \"Eu vou fazer uma trilha\"}]";

const ROLES_INSTANTIATION: &str = "**Instrução sobre Papéis para cada objeto:** 'entidades_plural' (ex: \"cães\"), 'entidade_singular' (ex: \"cão\"), 'propriedade' (ex: \"leais\"), 'a' (ex: \"Rex\").
**Exemplo:** [{\"entidades_plural\": \"gatos\", \"entidade_singular\": \"gato\", \"propriedade\": \"independentes\", \"a\": \"Bichano\"}]";

const PROPERTY_CAUSAL: &str = "**Instrução de Causalidade de Propriedades para cada objeto:** 'entidades_plural' (ex: \"pássaros\"), 'a' (ex: \"o pinguim\"), 'propriedade_p' e 'propriedade_q' devem ter uma relação causal (ser 'p' implica ser 'q').
**Exemplo:** [{\"a\": \"o pinguim\", \"entidades_plural\": \"pássaros\", \"propriedade_p\": \"vive na Antártida\", \"propriedade_q\": \"é adaptado ao frio\"}]";

const PROPERTY_CHAIN: &str = "**Instrução de Cadeia Causal de Propriedades:** 'entidades_plural' e 'entidade_singular' (ex: \"mamíferos\", \"mamífero\"), 'propriedade_p', 'propriedade_q', 'propriedade_r' devem formar uma cadeia lógica (p->q->r).
**Exemplo:** [{\"entidades_plural\": \"mamíferos\", \"entidade_singular\": \"mamífero\", \"propriedade_p\": \"é um carnívoro\", \"propriedade_q\": \"se alimenta de carne\", \"propriedade_r\": \"possui um sistema digestivo adaptado\"}]";

const PROPERTY_ALTERNATIVES: &str = "**Instrução de Propriedades Alternativas e Excludentes:**
- 'entidade_singular': Uma categoria (ex: \"animal\", \"veículo\").
- 'a': Uma instância dessa categoria (ex: \"o gato\", \"o carro\").
- 'propriedade_p' e 'propriedade_q' devem ser duas propriedades que são **alternativas plausíveis ou estados excludentes**. Um objeto geralmente não possui ambas ao mesmo tempo.
**Exemplo de Alta Qualidade:** {\"a\": \"o gato\", \"entidade_singular\": \"animal\", \"propriedade_p\": \"está dormindo\", \"propriedade_q\": \"está acordado\"}
**Exemplo de Falha (A SER EVITADO):** {\"a\": \"o carro\", \"propriedade_p\": \"é rápido\", \"propriedade_q\": \"tem quatro rodas\"} (Um carro pode ser ambos.)";

const IRRELEVANT_INFO: &str = "**Instrução sobre Papéis:** 'Coisas' (ex: \"pássaros\"), 'Coisa' (ex: \"pássaro\"), 'propriedade' (ex: \"voam\"), 'x' (ex: \"o canário Piu-Piu\"), 'propriedade_irrelevante' (ex: \"amarelo\").
**Exemplo:** [{\"Coisas\": \"pássaros\", \"Coisa\": \"pássaro\", \"propriedade\": \"voam\", \"x\": \"o canário Piu-Piu\", \"propriedade_irrelevante\": \"amarelo\"}]";

const PRIORITIES: &str = "**Instrução sobre Papéis:** 'fonte1' e 'fonte2' (ex: \"o relatório do meteorologista\", \"o aplicativo de tempo\"), 'p' (uma afirmação completa, ex: \"vai chover amanhã\").
**Exemplo:** [{\"fonte1\": \"o relatório do meteorologista\", \"fonte2\": \"o aplicativo de tempo\", \"p\": \"vai chover amanhã\"}]";

/// Guidance on the sentences of a bank for `rule`.
fn guidance(rule: &RuleDefinition) -> &'static str {
    use LogicFamily::*;

    match (rule.family, rule.name) {
        (Propositional, "Hypothetical_Syllogism") => CAUSAL_CHAIN,
        (Propositional, "Constructive_Dilemma" | "Destructive_Dilemma" | "Bidirectional_Dilemma") => DILEMMAS,

        (FirstOrder, "Universal_Instantiation") => ROLES_INSTANTIATION,
        (FirstOrder, "Modus_Ponens_FOL" | "Modus_Tollens_FOL") => PROPERTY_CAUSAL,
        (FirstOrder, "Hypothetical_Syllogism_FOL") => PROPERTY_CHAIN,
        (FirstOrder, "Disjunctive_Syllogism_FOL") => PROPERTY_ALTERNATIVES,

        (NonMonotonic, "Default_Reasoning_Irrelevant_Info") => IRRELEVANT_INFO,
        (NonMonotonic, "Reasoning_About_Priorities") => PRIORITIES,

        _ => CAUSAL,
    }
}

/// A request for `count` sentence banks for `rule`, with a key for each of the `base` placeholders.
pub fn sentence_banks(rule: &RuleDefinition, count: usize, base: &BTreeSet<String>) -> String {
    let keys = base.iter().map(|name| format!("\"{name}\"")).collect::<Vec<_>>().join(", ");

    format!(
        "Sua tarefa é gerar um array JSON contendo {count} objetos.
Cada objeto deve ter as chaves: {keys}.
{}
{RAW_JSON_ONLY}",
        guidance(rule)
    )
}

const NATURALIZE_EXAMPLE: &str = "Regra: Condição: Se Liam terminar seu trabalho cedo, então ele pedirá pizza para o jantar.; Situação: Ele não vai pedir pizza para o jantar.
Contexto: Liam terminou seu trabalho mais cedo naquele dia, o que significava que ele normalmente pediria pizza para o jantar. No entanto, neste dia em particular, ele decidiu não pedir pizza e optou por outra coisa.";

/// A request to rewrite the condition and situation of a templated context as a short story, without stating the conclusion.
pub fn naturalize(condition: &str, situation: &str) -> String {
    format!(
        "Melhore o contexto para uma linguagem humana e crie uma história com as sentenças reformuladas.
Instruções para gerar uma boa história:
1. Ao gerar a história, use as sentenças reformuladas do contexto da história.
2. Certifique-se de incluir sentenças correspondentes à condição e à situação da regra na história.
3. Não adicione nenhuma outra informação extra.
4. Para gerar a história, NÃO mude o nome do personagem principal do contexto, se houver.
5. Gere apenas um parágrafo com as sentenças reformuladas.
6. **NUNCA, EM HIPÓTESE ALGUMA, afirme ou descreva a CONCLUSÃO LÓGICA**. O objetivo é que a conclusão precise ser inferida.

---
{NATURALIZE_EXAMPLE}
---
Regra: Condição: {condition}; Situação: {situation}
Contexto:"
    )
}

/// A request for three plausible but incorrect answers, one on each line.
pub fn distractors(context: &str, correct_answer: &str) -> String {
    format!(
        "Sua tarefa é gerar TRÊS opções incorretas (distratores) para uma questão de múltipla escolha.
Os distratores devem ser plausíveis, mas logicamente incorretos em relação ao contexto.

Contexto: \"{context}\"
Resposta Correta: \"{correct_answer}\"

**IMPORTANTE:** Forneça APENAS os três distratores, cada um em uma nova linha, sem numeração ou marcadores."
    )
}

/// A request to formalize a natural context as premises and a conclusion over single-letter atoms.
pub fn formalize(natural_context: &str) -> String {
    format!(
        "Leia o contexto em linguagem natural abaixo. Identifique as premissas e a conclusão lógica implícita.
Traduza-as para um objeto JSON, usando variáveis de uma letra (p, q, r, s). Use apenas as funções: Implies, Not, Or, And.

Contexto: \"{natural_context}\"

Retorne SOMENTE o objeto JSON, com o formato: {{\"variables\": [\"p\", \"q\"], \"premises\": [\"Implies(p,q)\", \"Not(q)\"], \"conclusion\": \"Not(p)\"}}.
JSON:"
    )
}

/// A yes or no question on a context, to be answered with `Sim` or `Não`.
pub fn direct_answer(context: &str, question: &str) -> String {
    format!(
        "Considere o seguinte contexto:
{context}

Pergunta: {question}

Responda apenas 'Sim' ou 'Não'."
    )
}

/// A request for the result of a satisfiability check of a context together with the negation of a conclusion.
pub fn sat_check(context: &str, conclusion: &str) -> String {
    format!(
        "Considere o formato SMT-LIB. Para verificar se uma conclusão é consequência de premissas, checa-se se (Premissas E (NÃO Conclusão)) é 'sat' ou 'unsat'.

Premissas:
{context}

Conclusão: {conclusion}

Qual seria o resultado dessa verificação? Responda apenas 'sat' ou 'unsat'."
    )
}

#[cfg(test)]
mod prompt_tests {
    use super::*;
    use crate::catalogue::{self};

    #[test]
    fn bank_prompt_keys() {
        let rule = catalogue::lookup(LogicFamily::Propositional, "Modus_Tollens").unwrap();
        let prompt = sentence_banks(rule, 4, &catalogue::base_placeholders(rule));

        assert!(prompt.contains("contendo 4 objetos"));
        assert!(prompt.contains("as chaves: \"p\", \"q\"."));
        assert!(prompt.contains(CAUSAL));
    }

    #[test]
    fn bank_prompt_guidance() {
        let rule = catalogue::lookup(LogicFamily::Propositional, "Destructive_Dilemma").unwrap();
        let prompt = sentence_banks(rule, 1, &catalogue::base_placeholders(rule));
        assert!(prompt.contains(DILEMMAS));
    }

    #[test]
    fn evaluation_prompts() {
        let prompt = direct_answer("Chove.", "Isso implica que 'não chove'?");
        assert!(prompt.contains("Pergunta: Isso implica que 'não chove'?"));

        let prompt = sat_check("Chove.", "não chove");
        assert!(prompt.contains("Conclusão: não chove"));
        assert!(prompt.ends_with("Responda apenas 'sat' ou 'unsat'."));
    }

    #[test]
    fn formalize_prompt_braces() {
        let prompt = formalize("Chove.");
        assert!(prompt.contains("{\"variables\": [\"p\", \"q\"]"));
        assert!(prompt.contains("Contexto: \"Chove.\""));
    }
}
