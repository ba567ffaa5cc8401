//! Offline generator with fixed Portuguese texts.
//!
//! Dispatches on the task headline, the first line of the instruction body.
//! Unknown headlines get `OK`.

use dossie_core::generation::instruction_body;
use dossie_core::{GenerationError, GenerationService, Role};

const PROGRAM_TEXT: &str = "Programa Sugerido:
Ato I: 'O Lago dos Cisnes' – Trechos do Ato II (Tchaikovsky)
Ato II: 'A Bela Adormecida' – Variação Florine e Pássaro Azul (Tchaikovsky)
Ato III: 'Dom Quixote' – Grand Pas de Deux (Minkus)
Justificativa geral: equilíbrio entre lirismo e virtuosismo; trechos populares.";

const RELEASE_TEXT: &str = "Release:
A temporada ‘Clássicos em Cena’ celebra o legado do ballet acadêmico com três atos icônicos, \
unindo a poesia de Tchaikovsky e a energia de Minkus. Solistas convidados e cenografia modular \
garantem uma experiência imersiva ao público. Duração aprox.: 95 min.";

const SCHEDULE_TEXT: &str = "Cronograma Técnico (base):
- Montagem/linóleo: 10:00–12:00
- Luz & presets: 12:00–14:30
- Marcação: 14:30–15:00
- Ensaios: 15:00–17:00
- Passagem geral: 17:15–18:30
- Abertura de portas: 19:30
- Espetáculo: 20:00";

const CROSS_CHECK_TEXT: &str = "Relação Dados → Decisões:
- Preferências de compositores definem os destaques do programa.
- Dia e horário preferidos definem a janela do espetáculo.
- A faixa etária define o tom da comunicação.
- Os canais citados orientam a divulgação.
- A sensibilidade a preço orienta a estratégia de ingressos.";

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }

    fn answer(headline: &str) -> &'static str {
        let headline = headline.to_lowercase();
        if headline.contains("curar programa") {
            PROGRAM_TEXT
        } else if headline.contains("escrever release") {
            RELEASE_TEXT
        } else if headline.contains("cronograma técnico") {
            SCHEDULE_TEXT
        } else if headline.contains("relacionar") {
            CROSS_CHECK_TEXT
        } else {
            "OK"
        }
    }
}

impl GenerationService for CannedGenerator {
    fn id(&self) -> &str {
        "canned"
    }

    fn generate(&self, _role: &Role, prompt: &str) -> Result<String, GenerationError> {
        let headline = instruction_body(prompt).lines().next().unwrap_or_default();
        Ok(Self::answer(headline).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_on_headline() {
        let generator = CannedGenerator::new();
        let role = Role::new("Curador", "r", "g", "b");

        let out = generator
            .generate(&role, &role.instruct("Curar Programa: x\nAudiência: {}"))
            .unwrap();
        assert!(out.starts_with("Programa Sugerido:"));

        let out = generator
            .generate(&role, &role.instruct("CRONOGRAMA TÉCNICO\nPrograma: ..."))
            .unwrap();
        assert!(out.starts_with("Cronograma Técnico (base):"));
    }

    #[test]
    fn test_headline_only() {
        let generator = CannedGenerator::new();
        let role = Role::new("Redator", "r", "g", "b");
        // "curar programa" deeper in the body must not hijack the dispatch
        let out = generator
            .generate(&role, &role.instruct("Escrever Release\nnota: curar programa antes"))
            .unwrap();
        assert!(out.starts_with("Release:"));
    }

    #[test]
    fn test_unknown_task_ok() {
        let generator = CannedGenerator::new();
        let role = Role::new("X", "r", "g", "b");
        assert_eq!(generator.generate(&role, "qualquer coisa").unwrap(), "OK");
        assert!(generator.deterministic());
    }
}
