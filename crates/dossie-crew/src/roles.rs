//! The four reference roles.

use dossie_core::Role;

pub fn curator() -> Role {
    Role::new(
        "Curador",
        "Definir repertório",
        "Montar programa coerente e popular",
        "Especialista em repertório clássico.",
    )
}

pub fn writer() -> Role {
    Role::new(
        "Redator",
        "Comunicação",
        "Escrever release alinhado ao público",
        "Jornalista cultural de dança.",
    )
}

pub fn technical_director() -> Role {
    Role::new(
        "Diretor Técnico",
        "Palco e ensaios",
        "Planejar cronograma otimizado",
        "Stage manager experiente.",
    )
}

pub fn coherence_reviewer() -> Role {
    Role::new(
        "Avaliador de Coerência",
        "Validação",
        "Relacionar dados do público às decisões",
        "Consultor de market-fit.",
    )
}
