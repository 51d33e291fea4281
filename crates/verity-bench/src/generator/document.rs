//! Ground-truth document, schema, and page-text builders.

use rand::Rng;
use rand::rngs::StdRng;
use verity_core::{JsonMap, JsonValue, SchemaNode};

use super::GeneratorConfig;

// Vocabulary pools are ASCII throughout so page text can be truncated at a
// byte offset without splitting a code point.

const VENDORS: &[&str] = &[
    "Acme Industrial Supply",
    "Harbor Freight Partners",
    "Meridian Office Group",
    "Cascade Paper Co",
    "Ironwood Tools Ltd",
    "Bluepeak Electric",
    "Summit Catering",
    "Northgate Chemicals",
    "Atlas Packaging",
    "Redwood Print Works",
    "Lakeside Hardware",
    "Pinnacle Plastics",
    "Delta Freight Lines",
    "Orchard Foods Inc",
    "Granite Building Supply",
];

const CITIES: &[&str] = &[
    "Portland",
    "Austin",
    "Rotterdam",
    "Leeds",
    "Osaka",
    "Toronto",
    "Helsinki",
    "Lyon",
    "Denver",
    "Cork",
    "Adelaide",
    "Tampere",
];

const STREETS: &[&str] = &[
    "Harbor Way",
    "Mill Road",
    "Commerce St",
    "Depot Lane",
    "Foundry Ave",
    "Quarry Blvd",
    "Station Rd",
    "Dockside Dr",
];

const PRODUCTS: &[&str] = &[
    "copper fittings",
    "gasket set",
    "packing tape",
    "toner cartridge",
    "safety gloves",
    "hex bolts",
    "label rolls",
    "cable ties",
    "pallet wrap",
    "drill bits",
    "paper reams",
    "cleaning solvent",
    "anchor screws",
    "shrink film",
];

const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CAD"];

const NOTES: &[&str] = &[
    "net 30",
    "deliver to dock 4",
    "po required",
    "partial shipment",
    "hold for pickup",
    "fragile",
    "signature required",
    "quote ref attached",
];

/// Extra scalar field names, shared by the header and section builders.
/// Disjoint from the fixed keys (`invoice_number`, `vendor`, `line_items`,
/// `entries`, `details`, ...) so generated keys never collide.
const HEADER_KEYS: &[&str] = &[
    "subtotal",
    "tax",
    "discount",
    "shipping",
    "balance_due",
    "po_number",
    "terms",
    "due_date",
    "reference",
    "account_no",
    "contact",
    "phone",
    "email",
    "clerk",
    "register",
    "order_id",
    "tax_rate",
    "department",
    "payment_method",
    "change_due",
];

const SECTION_KEYS: &[&str] = &[
    "billing",
    "delivery",
    "customer",
    "warranty",
    "approval",
    "inspection",
    "handling",
    "customs",
    "insurance",
    "returns",
];

/// Builds one ground-truth document: a fixed invoice header, extra header
/// scalars, a `vendor` block, nested sections, and array fields per the
/// configuration. The first array is the root `line_items`; the rest land
/// one per section under an `entries` key.
pub fn build_document(config: &GeneratorConfig, rng: &mut StdRng) -> JsonValue {
    let mut doc = JsonMap::new();
    doc.insert(
        "invoice_number".to_owned(),
        JsonValue::String(format!("INV-{:05}", rng.gen_range(10_000..100_000))),
    );
    doc.insert("issued".to_owned(), JsonValue::String(gen_date(rng)));
    doc.insert(
        "currency".to_owned(),
        JsonValue::String(CURRENCIES[rng.gen_range(0..CURRENCIES.len())].to_owned()),
    );
    doc.insert("total".to_owned(), JsonValue::Float(gen_amount(rng)));
    doc.insert("paid".to_owned(), JsonValue::Bool(rng.gen_bool(0.7)));

    for i in 0..config.num_header_fields {
        doc.insert(indexed_key(HEADER_KEYS, i), gen_scalar(rng));
    }

    doc.insert("vendor".to_owned(), build_vendor(rng));

    for s in 0..config.num_sections {
        let with_entries = config.num_arrays > 0 && s < config.num_arrays - 1;
        doc.insert(
            indexed_key(SECTION_KEYS, s),
            build_section(config, rng, config.section_depth, with_entries),
        );
    }

    if config.num_arrays > 0 {
        doc.insert(
            "line_items".to_owned(),
            JsonValue::Array(gen_line_items(rng, config.items_per_array)),
        );
    }

    JsonValue::Object(doc)
}

fn build_vendor(rng: &mut StdRng) -> JsonValue {
    let mut address = JsonMap::new();
    address.insert(
        "street".to_owned(),
        JsonValue::String(format!(
            "{} {}",
            rng.gen_range(1..400),
            STREETS[rng.gen_range(0..STREETS.len())]
        )),
    );
    address.insert(
        "city".to_owned(),
        JsonValue::String(CITIES[rng.gen_range(0..CITIES.len())].to_owned()),
    );
    address.insert(
        "postal_code".to_owned(),
        JsonValue::String(format!("{:05}", rng.gen_range(1_000..100_000))),
    );

    let mut vendor = JsonMap::new();
    vendor.insert(
        "name".to_owned(),
        JsonValue::String(VENDORS[rng.gen_range(0..VENDORS.len())].to_owned()),
    );
    vendor.insert(
        "vat_id".to_owned(),
        JsonValue::String(format!("VAT-{:06}", rng.gen_range(0..1_000_000))),
    );
    vendor.insert("address".to_owned(), JsonValue::Object(address));
    JsonValue::Object(vendor)
}

fn build_section(
    config: &GeneratorConfig,
    rng: &mut StdRng,
    depth: usize,
    with_entries: bool,
) -> JsonValue {
    let mut section = JsonMap::new();
    for i in 0..config.fields_per_section {
        section.insert(indexed_key(HEADER_KEYS, i), gen_scalar(rng));
    }
    if with_entries {
        section.insert(
            "entries".to_owned(),
            JsonValue::Array(gen_line_items(rng, config.items_per_array)),
        );
    }
    if depth > 1 {
        section.insert(
            "details".to_owned(),
            build_section(config, rng, depth - 1, false),
        );
    }
    JsonValue::Object(section)
}

/// Generates `count` line-item strings like `"3 x copper fittings @ 12.40"`.
pub fn gen_line_items(rng: &mut StdRng, count: usize) -> Vec<JsonValue> {
    (0..count)
        .map(|_| JsonValue::String(gen_line_item(rng)))
        .collect()
}

fn gen_line_item(rng: &mut StdRng) -> String {
    let qty = rng.gen_range(1..24);
    let product = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
    let price = f64::from(rng.gen_range(50..25_000)) / 100.0;
    format!("{qty} x {product} @ {price:.2}")
}

fn gen_scalar(rng: &mut StdRng) -> JsonValue {
    match rng.gen_range(0..6) {
        0 => JsonValue::String(NOTES[rng.gen_range(0..NOTES.len())].to_owned()),
        1 => JsonValue::String(gen_date(rng)),
        2 => JsonValue::Integer(rng.gen_range(1..10_000)),
        3 => JsonValue::Float(gen_amount(rng)),
        4 => JsonValue::Bool(rng.gen_bool(0.5)),
        _ => JsonValue::Null,
    }
}

fn gen_date(rng: &mut StdRng) -> String {
    format!(
        "2024-{:02}-{:02}",
        rng.gen_range(1..13),
        rng.gen_range(1..29)
    )
}

/// Two-decimal currency amount between 1.00 and 10000.00.
fn gen_amount(rng: &mut StdRng) -> f64 {
    f64::from(rng.gen_range(100..1_000_000)) / 100.0
}

/// Deterministic key for slot `index`: pool names first, numbered variants
/// once the pool wraps.
fn indexed_key(pool: &[&str], index: usize) -> String {
    let base = pool[index % pool.len()];
    let round = index / pool.len();
    if round == 0 {
        base.to_owned()
    } else {
        format!("{base}_{round}")
    }
}

/// Renders the page text a clean scan of the invoice would carry, exactly
/// `config.text_len` bytes of it.
pub fn build_page_text(config: &GeneratorConfig, rng: &mut StdRng) -> String {
    let mut page = format!("INVOICE INV-{:05}\n", rng.gen_range(10_000..100_000));
    while page.len() < config.text_len {
        match rng.gen_range(0..4) {
            0 => {
                page.push_str(VENDORS[rng.gen_range(0..VENDORS.len())]);
                page.push_str("  ");
                page.push_str(CITIES[rng.gen_range(0..CITIES.len())]);
                page.push('\n');
            }
            1 => {
                page.push_str(&gen_line_item(rng));
                page.push('\n');
            }
            2 => {
                page.push_str(&format!("SUBTOTAL {:.2}\n", gen_amount(rng)));
            }
            _ => {
                page.push_str(&format!(
                    "DATE {}  REF {:04}\n",
                    gen_date(rng),
                    rng.gen_range(0..10_000)
                ));
            }
        }
    }
    page.truncate(config.text_len);
    page
}

/// Derives the extraction schema describing a document's shape.
///
/// Array element schemas come from the first element; an empty array
/// carries no `items` entry.
pub fn schema_of(document: &JsonValue) -> SchemaNode {
    match document {
        JsonValue::Object(map) => SchemaNode {
            schema_type: Some("object".to_owned()),
            properties: Some(
                map.iter()
                    .map(|(key, child)| (key.clone(), schema_of(child)))
                    .collect(),
            ),
            ..SchemaNode::default()
        },
        JsonValue::Array(items) => SchemaNode {
            schema_type: Some("array".to_owned()),
            items: items.first().map(|first| Box::new(schema_of(first))),
            ..SchemaNode::default()
        },
        JsonValue::String(_) => leaf_schema("string"),
        JsonValue::Integer(_) | JsonValue::UnsignedInteger(_) => leaf_schema("integer"),
        JsonValue::Float(_) => leaf_schema("number"),
        JsonValue::Bool(_) => leaf_schema("boolean"),
        JsonValue::Null => leaf_schema("null"),
    }
}

fn leaf_schema(type_tag: &str) -> SchemaNode {
    SchemaNode {
        schema_type: Some(type_tag.to_owned()),
        ..SchemaNode::default()
    }
}
