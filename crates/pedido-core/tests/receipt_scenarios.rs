//! Whole-receipt scenarios through the public API.

use pedido_core::{OrderParser, OrderRecord, OrderSession, ReceiptParser, extract};
use pretty_assertions::assert_eq;

fn prior_record() -> OrderRecord {
    OrderRecord {
        client_name: "João Pereira".to_string(),
        phone: "(62) 98765-4321".to_string(),
        address: "Quadra 12, Lote 4, Setor Sul CEP: 74.080-010".to_string(),
        products: vec!["Amoxicilina 500mg (1x)".to_string()],
        total_value: "45,90".to_string(),
        order_id: "1001".to_string(),
    }
}

#[test]
fn empty_text_without_prior_is_empty_record() {
    assert_eq!(extract("", None), OrderRecord::default());
}

#[test]
fn empty_text_returns_prior_unchanged() {
    let prior = prior_record();
    assert_eq!(extract("", Some(&prior)), prior);
}

#[test]
fn new_products_replace_prior_list() {
    let prior = prior_record();
    let text = "CRM/CRO/CRV\n111111 Dipirona 500mg\n2\n222222 Omeprazol 20mg\n1";

    let record = extract(text, Some(&prior));

    assert_eq!(
        record.products,
        vec!["Dipirona 500mg (2x)".to_string(), "Omeprazol 20mg (1x)".to_string()]
    );
}

#[test]
fn every_scalar_field_falls_back_to_prior() {
    let prior = prior_record();
    let record = extract("texto sem nenhum campo reconhecível", Some(&prior));

    assert_eq!(record.client_name, prior.client_name);
    assert_eq!(record.phone, prior.phone);
    assert_eq!(record.address, prior.address);
    assert_eq!(record.total_value, prior.total_value);
    assert_eq!(record.order_id, prior.order_id);
    assert_eq!(record.products, prior.products);
}

#[test]
fn phones_normalize_to_canonical_masks() {
    let cases = [
        ("Tel: (61) 99876-5432", "(61) 99876-5432"),
        ("Fone [61]3333 4444", "(61) 3333-4444"),
        ("Contato {62 98765-4321", "(62) 98765-4321"),
        ("6133334444", "(61) 3333-4444"),
        ("61 987654321", "(61) 98765-4321"),
    ];

    for (line, expected) in cases {
        assert_eq!(extract(line, None).phone, expected, "line: {line}");
    }
}

#[test]
fn repeated_product_keeps_later_quantity() {
    let text = "CRM/CRO/CRV\n\
        123456 Dipirona 500mg\n\
        2\n\
        654321 Losartana 50mg\n\
        1\n\
        123456 Dipirona 500mg\n\
        3";

    let record = extract(text, None);

    assert_eq!(
        record.products,
        vec!["Dipirona 500mg (3x)".to_string(), "Losartana 50mg (1x)".to_string()]
    );
}

#[test]
fn grand_total_is_third_amount_verbatim() {
    let text = "Total Geral\n1.234,56\n34,56\n1.200,00";
    assert_eq!(extract(text, None).total_value, "1.200,00");
}

#[test]
fn non_ascii_digits_never_reach_the_record() {
    assert_eq!(extract("Total Geral\n١٠,٠٠\n٠,٠٠\n١٠,٠٠", None).total_value, "");
    assert!(extract("CRM/CRO/CRV\n１２３４５６ Dipirona\n2", None).products.is_empty());

    let line = "Rua das Flores 123 CEP: ７４２１０-０００";
    assert_eq!(extract(line, None).address, line);
}

#[test]
fn end_to_end_receipt() {
    let lines = [
        "Nome do Cliente",
        "Maria Silva",
        "Endereço de entrega",
        "Rua das Flores, 123, Setor Bueno CEP: 74.210-000",
        "CRM/CRO/CRV",
        "123456 Dipirona 500mg",
        "2",
        "Total Geral",
        "10,00",
        "0,00",
        "10,00",
    ];

    let record = extract(&lines.join("\n"), None);

    assert_eq!(
        record,
        OrderRecord {
            client_name: "Maria Silva".to_string(),
            phone: String::new(),
            address: "Rua das Flores, 123, Setor Bueno CEP: 74.210-000".to_string(),
            products: vec!["Dipirona 500mg (2x)".to_string()],
            total_value: "10,00".to_string(),
            order_id: String::new(),
        }
    );
    assert!(record.has_valid_data());
    assert_eq!(record.missing_fields(), vec!["phone", "orderId"]);
}

#[test]
fn two_screenshots_build_one_order() {
    let first = "Último orçamento des\n\
        4821\n\
        Nome do Cliente\n\
        Ana Costa\n\
        Telefone (61) 99999-0000";
    let second = "Endereço de entrega\n\
        Quadra 3 Conjunto B Casa 7, Sobradinho\n\
        CEP: 73.030-030\n\
        CRM/CRO/CRV\n\
        100200 Paracetamol 750mg\n\
        1,5\n\
        Total Geral\n\
        19,90\n\
        0,00\n\
        19,90";

    let mut session = OrderSession::new();
    session.ingest(first);
    let result = session.ingest(second);

    assert!(result.warnings.contains(&"Could not extract phone".to_string()));

    let record = session.into_record();
    assert_eq!(record.order_id, "4822");
    assert_eq!(record.client_name, "Ana Costa");
    assert_eq!(record.phone, "(61) 99999-0000");
    assert_eq!(
        record.address,
        "Quadra 3 Conjunto B Casa 7, Sobradinho CEP: 73.030-030"
    );
    assert_eq!(record.products, vec!["Paracetamol 750mg (1.5x)".to_string()]);
    assert_eq!(record.price_label(), "R$ 19.90");
    assert!(record.ensure_complete().is_ok());
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = std::sync::Arc::new(ReceiptParser::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || {
                let text = format!("Último orçamento deste terminal\n{}", 100 + i);
                parser.parse(&text, None).record.order_id
            })
        })
        .collect();

    let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids, vec!["101", "102", "103", "104"]);
}
