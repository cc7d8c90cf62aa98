//! Anchor labels and keyword tables used by the field detectors.
//!
//! The receipts come from a pharmacy point-of-sale system in Portuguese, so
//! the labels are matched literally as printed on the receipt.

/// Label printed before the customer name.
pub const CLIENT_NAME_LABEL: &str = "Nome do Cliente";

/// Line that surrounds the customer name in the compact receipt layout.
pub const NAME_DELIMITER: &str = "...";

/// Label printed before the delivery address.
pub const DELIVERY_ADDRESS_LABEL: &str = "Endereço de entrega";

/// Postal code label.
pub const CEP_LABEL: &str = "CEP:";

/// Header of the itemized product table.
pub const PRODUCT_TABLE_ANCHOR: &str = "CRM/CRO/CRV";

/// Label preceding subtotal, discount and grand total.
pub const TOTAL_ANCHOR: &str = "Total Geral";

/// "Último orçamento deste terminal" as OCR may cut it at the line wrap,
/// longest first. The last entry matches any truncation.
pub const LAST_QUOTE_PREFIXES: &[&str] = &[
    "Último orçamento deste terminal",
    "Último orçamento deste ter",
    "Último orçamento des",
    "Último orçamen",
    "Último orça",
    "Último",
];

/// Phrases that disqualify a customer name candidate (lowercase).
pub const NAME_REJECT_PHRASES: &[&str] = &[
    "convênio",
    "convenio",
    "conheça",
    "conheca",
    "endereço",
    "endereco",
    "dúvidas",
    "duvidas",
    "cpf",
    "cartão",
    "cartao",
    "base de conhecimento",
    "...",
];

/// Characters that do not occur in personal names.
pub const NAME_REJECT_SYMBOLS: &[char] = &[
    '%', '$', '@', '&', '*', '#', '<', '>', '{', '}', '[', ']', '/', '\\', '|', '+', '=', '~',
    '`', '^',
];

/// Vocabulary of Brazilian (Federal District and Goiás) addresses (lowercase).
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "rua",
    "quadra",
    "lote",
    "conjunto",
    "qd",
    "lt",
    "cj",
    "conj",
    "avenida",
    "av",
    "alameda",
    "travessa",
    "rod",
    "rodovia",
    "estrada",
    "praça",
    "via",
    "trecho",
    "chácara",
    "chacara",
    "casa",
    "setor",
    "núcleo",
    "nucleo",
    "área",
    "area",
    "bloco",
    "apt",
    "apartamento",
    "qnm",
    "qnn",
    "qnp",
    "qnq",
    "shis",
    "shcs",
    "paranoa",
    "brasilia",
    "nr",
    "df",
    "go",
    "bairro",
];

/// Receipt boilerplate that mentions address words but is not an address
/// (lowercase).
pub const ADDRESS_REJECT_PHRASES: &[&str] = &[
    "conheça",
    "base de conhecimento",
    "últimos 20 itens",
    "útimos 20 itens",
    "ultimos 20 itens",
    "utimos 20 itens",
    "ultimos",
    "utimos",
    "itens",
    "itens comprados",
    "dúvidas",
    "matriz",
];

/// Whether `text` contains any of `phrases`, ignoring case.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|phrase| lower.contains(phrase))
}
