//! Address display template
//!
//! Composes up to four lines from a candidate's address: name, road with
//! house number, postcode with city, state with country. A line whose
//! fields are all blank is left out. In HTML every value is escaped.

use domain::Address;

/// CSS class of the name and road lines
pub const ROAD_CLASS: &str = "gcd-road";
/// CSS class of the postcode/city line
pub const CITY_CLASS: &str = "gcd-city";
/// CSS class of the state/country line
pub const COUNTRY_CLASS: &str = "gcd-country";

const LINE_SEPARATOR: &str = "<br>";

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).map(str::trim).filter(|v| !v.is_empty())
}

fn join(fields: &[Option<&String>]) -> Option<String> {
    let parts: Vec<&str> = fields.iter().filter_map(|f| present(*f)).collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Display lines with their CSS class, unescaped
fn lines(address: &Address) -> Vec<(&'static str, String)> {
    [
        (ROAD_CLASS, join(&[address.name.as_ref()])),
        (
            ROAD_CLASS,
            join(&[address.road.as_ref(), address.house_number.as_ref()]),
        ),
        (
            CITY_CLASS,
            join(&[address.postcode.as_ref(), address.city.as_ref()]),
        ),
        (
            COUNTRY_CLASS,
            join(&[address.state.as_ref(), address.country.as_ref()]),
        ),
    ]
    .into_iter()
    .filter_map(|(class, text)| text.map(|t| (class, t)))
    .collect()
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the address as HTML, one `<span>` per line joined by `<br>`
pub fn render_html(address: &Address) -> String {
    lines(address)
        .into_iter()
        .map(|(class, text)| format!("<span class=\"{class}\">{}</span>", escape_html(&text)))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Render the address as plain text, one line per row
pub fn render_plain(address: &Address) -> String {
    lines(address)
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Address {
        Address {
            name: Some("Brandenburger Tor".to_string()),
            road: Some("Pariser Platz".to_string()),
            house_number: Some("1".to_string()),
            postcode: Some("10117".to_string()),
            city: Some("Berlin".to_string()),
            state: Some("Berlin".to_string()),
            country: Some("Deutschland".to_string()),
        }
    }

    #[test]
    fn renders_all_four_lines() {
        let html = render_html(&full());
        assert_eq!(
            html,
            "<span class=\"gcd-road\">Brandenburger Tor</span><br>\
             <span class=\"gcd-road\">Pariser Platz 1</span><br>\
             <span class=\"gcd-city\">10117 Berlin</span><br>\
             <span class=\"gcd-country\">Berlin Deutschland</span>"
        );
    }

    #[test]
    fn omits_blank_lines() {
        let address = Address {
            name: Some("Somewhere".to_string()),
            road: Some(String::new()),
            house_number: Some(String::new()),
            country: Some("France".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_html(&address),
            "<span class=\"gcd-road\">Somewhere</span><br>\
             <span class=\"gcd-country\">France</span>"
        );
        assert_eq!(render_plain(&address), "Somewhere\nFrance");
    }

    #[test]
    fn postcode_alone_keeps_city_line() {
        let address = Address {
            postcode: Some("75001".to_string()),
            ..Default::default()
        };
        assert_eq!(render_plain(&address), "75001");
    }

    #[test]
    fn empty_address_renders_nothing() {
        assert_eq!(render_html(&Address::default()), "");
        assert_eq!(render_plain(&Address::default()), "");
    }

    #[test]
    fn script_in_name_is_escaped() {
        let address = Address {
            name: Some("<script>alert('x')</script>".to_string()),
            ..Default::default()
        };
        let html = render_html(&address);
        assert!(!html.contains("<script>"));
        assert_eq!(
            html,
            "<span class=\"gcd-road\">&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;</span>"
        );
    }

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(
            escape_html(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &#039;f&#039;"
        );
    }

    #[test]
    fn plain_text_is_not_escaped() {
        let address = Address {
            road: Some("Rue d'Alésia".to_string()),
            ..Default::default()
        };
        assert_eq!(render_plain(&address), "Rue d'Alésia");
    }
}
