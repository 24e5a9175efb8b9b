use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Category;

static ACCESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)acesso|login|senha|reset").expect("valid access regex"));
static STATUS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)status|andamento").expect("valid status regex"));
static ATTACHMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)anexo|arquivo|attachment|pdf").expect("valid attachment regex")
});
static FESTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)feliz natal|parabéns|boas festas").expect("valid festive regex")
});

pub const ACCESS_REPLY: &str =
    "Olá! Recebemos sua solicitação de acesso. Confirme usuário e sistema para agilizar.";
pub const STATUS_REPLY: &str =
    "Olá! Seu pedido está em análise. Retornaremos com atualização até o fim do dia útil.";
pub const ATTACHMENT_REPLY: &str =
    "Olá! Recebemos o arquivo. Vamos validar e retornamos com os próximos passos.";
pub const FORWARDED_REPLY: &str =
    "Olá! Registramos sua solicitação e encaminhamos à equipe responsável.";
pub const FESTIVE_REPLY: &str = "Muito obrigado pelos votos! Desejamos o mesmo para você. 😉";
pub const THANKS_REPLY: &str = "Obrigado pela mensagem! Estamos à disposição.";

pub fn suggest_reply(category: Category, text: &str) -> &'static str {
    match category {
        Category::Productive => productive_reply(text),
        Category::Unproductive => unproductive_reply(text),
    }
}

// First match wins.
fn productive_reply(text: &str) -> &'static str {
    if ACCESS_REGEX.is_match(text) {
        ACCESS_REPLY
    } else if STATUS_REGEX.is_match(text) {
        STATUS_REPLY
    } else if ATTACHMENT_REGEX.is_match(text) {
        ATTACHMENT_REPLY
    } else {
        FORWARDED_REPLY
    }
}

fn unproductive_reply(text: &str) -> &'static str {
    if FESTIVE_REGEX.is_match(text) {
        FESTIVE_REPLY
    } else {
        THANKS_REPLY
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn access_pattern_takes_priority_over_status_and_attachment() {
        let text = "Status do reset de SENHA, segue anexo";
        assert_eq!(suggest_reply(Category::Productive, text), ACCESS_REPLY);
    }

    #[test]
    fn status_pattern_beats_attachment() {
        let text = "Qual o andamento? Reenvio o arquivo.";
        assert_eq!(suggest_reply(Category::Productive, text), STATUS_REPLY);
    }

    #[test]
    fn attachment_pattern_matches_pdf() {
        assert_eq!(
            suggest_reply(Category::Productive, "Erro ao abrir o PDF"),
            ATTACHMENT_REPLY
        );
    }

    #[test]
    fn productive_without_pattern_is_forwarded() {
        assert_eq!(
            suggest_reply(Category::Productive, "Tenho um problema urgente"),
            FORWARDED_REPLY
        );
    }

    #[test]
    fn festive_unproductive_gets_warm_reply() {
        assert_eq!(
            suggest_reply(Category::Unproductive, "Boas Festas a toda a equipe"),
            FESTIVE_REPLY
        );
    }

    #[test]
    fn plain_unproductive_gets_generic_thanks() {
        assert_eq!(suggest_reply(Category::Unproductive, ""), THANKS_REPLY);
        assert_eq!(
            suggest_reply(Category::Unproductive, "bom dia, obrigado"),
            THANKS_REPLY
        );
    }
}
