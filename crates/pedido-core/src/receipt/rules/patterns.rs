//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

// Digits are written [0-9]: `\d` would also accept Arabic-Indic or
// fullwidth digits, which never form a valid phone, CEP or amount.
lazy_static! {
    // Brazilian phone, tolerating OCR bracket noise around the area code:
    // "(61) 99876-5432", "[61]3333 4444", "{62 98765-4321"
    pub static ref PHONE: Regex = Regex::new(
        r"[\[({]?[0-9]{2}[\])}]?\s*[0-9]{4,5}[-\s]?[0-9]{4}"
    ).unwrap();

    // CEP (postal code): 74.210-000 or 74210-000
    pub static ref CEP: Regex = Regex::new(
        r"[0-9]{2}\.[0-9]{3}-[0-9]{3}|[0-9]{5}-[0-9]{3}"
    ).unwrap();

    // Label and everything after it, stripped from address candidates
    pub static ref CEP_SUFFIX: Regex = Regex::new(
        r"(?i)CEP:.*$"
    ).unwrap();

    // Label left at the end of an address without a value
    pub static ref DANGLING_CEP: Regex = Regex::new(
        r"(?i)CEP:\s*$"
    ).unwrap();

    // Product row: 6-digit code followed by the product name
    pub static ref PRODUCT_ROW: Regex = Regex::new(
        r"^[0-9]{6}\s+(.+)$"
    ).unwrap();

    // Quantity line: integer with up to 3 decimal places
    pub static ref QUANTITY: Regex = Regex::new(
        r"^([0-9]+(?:,[0-9]{1,3})?)$"
    ).unwrap();

    // Amount in Brazilian format: 1.234,56 or 10,00
    pub static ref BRL_AMOUNT: Regex = Regex::new(
        r"[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}"
    ).unwrap();

    // Address cleanup
    pub static ref REPEATED_DOTS: Regex = Regex::new(r"\.{2,}").unwrap();
    pub static ref REPEATED_COMMAS: Regex = Regex::new(r",{2,}").unwrap();
    pub static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([.,:])").unwrap();
}
