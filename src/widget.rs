use crate::error::SdkError;
use crate::settings::WidgetSettings;

/// Path of the widget client script, relative to the base URL.
pub const CLIENT_SCRIPT_PATH: &str = "/api/widget/client.js";

pub fn client_script_url(base_url: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}{CLIENT_SCRIPT_PATH}")
}

/// Render the full HTML document that boots the widget in embedded mode.
pub fn widget_document(settings: &WidgetSettings<'_>) -> Result<String, SdkError> {
    let settings_json = script_safe(&settings.to_json()?);
    let script_src = escape_attr(&client_script_url(settings.base_url));
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        html, body {{
            width: 100%;
            height: 100%;
            overflow: hidden;
            background: transparent;
        }}
        /* Embedded mode: the widget always fills the surface */
        #helplane-widget-container {{
            position: fixed !important;
            top: 0 !important;
            left: 0 !important;
            right: 0 !important;
            bottom: 0 !important;
            width: 100% !important;
            height: 100% !important;
        }}
        [data-helplane-launcher] {{
            display: none !important;
        }}
    </style>
</head>
<body>
    <script>
        window.HelpLaneSettings = {settings_json};
        window.HelpLaneSettings.autoOpen = true;
        window.HelpLaneSettings.hideLauncher = true;
    </script>
    <script src="{script_src}" defer></script>
</body>
</html>
"#
    ))
}

// JSON is valid JS, but a literal "</script>" inside a string would close the tag.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

/// Escape a value for a double-quoted HTML attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
