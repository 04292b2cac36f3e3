use core::fmt::{self, Write};

use boardtest_netutils::form::write_html_escaped;

use super::fields::{FIELD_GROUPS, FieldId, FieldKind};
use super::form::{FieldError, FormErrors};
use crate::domain::settings::BoardSettings;

pub const ROOT_TITLE: &str = "IotWebConf 03 Custom Parameters";

const HEAD: &str = "<!DOCTYPE html><html lang=\"en\"><head><meta name=\"viewport\" \
                    content=\"width=device-width, initial-scale=1, user-scalable=no\"/>";

const CONFIG_STYLE: &str = "<style>body{font-family:sans-serif;max-width:32em;margin:auto}\
                            fieldset{margin-bottom:1em}label{display:block;margin-top:.5em}\
                            input{width:100%}.em{color:#c00;font-size:.9em}</style>";

/// Landing page listing the custom parameter values.
pub fn render_root_page(out: &mut impl Write, settings: &BoardSettings) -> fmt::Result {
    write!(out, "{HEAD}<title>{ROOT_TITLE}</title></head><body>Hello world!")?;
    out.write_str("<ul>")?;
    write!(out, "<li>DHT read interval param value: {}", settings.dht_interval_secs)?;
    write!(out, "<li>Status wait param value: {}", settings.status_wait_secs)?;
    out.write_str("<li>String param value: ")?;
    write_html_escaped(out, &settings.string_param)?;
    write!(out, "<li>Float param value: {:.2}", settings.float_param)?;
    out.write_str("</ul>")?;
    out.write_str("Go to <a href='config'>configure page</a> to change values.")?;
    out.write_str("</body></html>\n")
}

/// Configuration form, optionally with the errors of a rejected submission.
pub fn render_config_page(
    out: &mut impl Write,
    settings: &BoardSettings,
    errors: Option<&FormErrors>,
    saved: bool,
) -> fmt::Result {
    write!(out, "{HEAD}<title>Config ")?;
    write_html_escaped(out, &settings.thing_name)?;
    write!(out, "</title>{CONFIG_STYLE}</head><body>")?;

    if saved {
        out.write_str("<p>Configuration saved.</p>")?;
    }

    out.write_str("<form action='' method='post'>")?;
    for group in &FIELD_GROUPS {
        write!(out, "<fieldset><legend>{}</legend>", group.legend)?;
        for &field in group.fields {
            render_field(out, settings, field, errors.and_then(|e| e.get(field)))?;
        }
        out.write_str("</fieldset>")?;
    }
    out.write_str("<button type='submit'>Apply</button></form>")?;
    out.write_str("<p>Go to <a href='/'>home page</a>.</p></body></html>\n")
}

fn render_field(
    out: &mut impl Write,
    settings: &BoardSettings,
    field: FieldId,
    error: Option<FieldError>,
) -> fmt::Result {
    let id = field.id();
    write!(out, "<div><label for='{id}'>{}</label>", field.label())?;

    match field.kind() {
        FieldKind::Text { max_len } => {
            write!(out, "<input type='text' id='{id}' name='{id}' maxlength='{max_len}' value='")?;
            write_text_value(out, settings, field)?;
            out.write_str("'")?;
        }
        FieldKind::Password { max_len } => {
            write!(
                out,
                "<input type='password' id='{id}' name='{id}' maxlength='{max_len}' \
                 placeholder='keep current' value=''"
            )?;
        }
        FieldKind::Integer { min, max } => {
            write!(
                out,
                "<input type='number' id='{id}' name='{id}' min='{min}' max='{max}' step='1' value='"
            )?;
            write_number_value(out, settings, field)?;
            out.write_str("'")?;
        }
        FieldKind::Float { step } => {
            write!(
                out,
                "<input type='number' id='{id}' name='{id}' step='{step}' value='{}'",
                settings.float_param
            )?;
        }
    }
    if let Some(placeholder) = field.placeholder() {
        write!(out, " placeholder='{placeholder}'")?;
    }
    out.write_str("/>")?;

    if let Some(error) = error {
        write!(out, "<div class='em'>{error}</div>")?;
    }
    out.write_str("</div>")
}

fn write_text_value(out: &mut impl Write, settings: &BoardSettings, field: FieldId) -> fmt::Result {
    let value: &str = match field {
        FieldId::ThingName => &settings.thing_name,
        FieldId::WifiSsid => &settings.wifi_ssid,
        FieldId::StringParam => &settings.string_param,
        _ => "",
    };
    write_html_escaped(out, value)
}

fn write_number_value(out: &mut impl Write, settings: &BoardSettings, field: FieldId) -> fmt::Result {
    match field {
        FieldId::ApTimeout => write!(out, "{}", settings.ap_timeout_secs),
        FieldId::DhtInterval => write!(out, "{}", settings.dht_interval_secs),
        FieldId::StatusWait => write!(out, "{}", settings.status_wait_secs),
        _ => Ok(()),
    }
}

pub fn render_not_found(out: &mut impl Write, path: &str) -> fmt::Result {
    write!(out, "{HEAD}<title>Not found</title></head><body>Not found: ")?;
    write_html_escaped(out, path)?;
    out.write_str("</body></html>\n")
}
