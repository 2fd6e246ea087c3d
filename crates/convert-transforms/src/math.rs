//! Math typesetting bootstrap injected into documents before printing.
//!
//! The page polls for MathJax for a bounded time, asks it to typeset, and
//! logs (never throws) when the library is absent or typesetting fails.

use convert_utils::html::inject_body_end;

/// Interval between checks for the typesetting library.
const POLL_INTERVAL_MS: u64 = 100;

/// The bootstrap `<script>` element.
pub fn typeset_script(load_timeout_ms: u64) -> String {
    format!(
        r#"<script id="dcv-typeset">
(function () {{
  var deadline = Date.now() + {timeout};
  function typeset() {{
    var mj = window.MathJax;
    if (mj && typeof mj.typesetPromise === 'function') {{
      mj.typesetPromise().catch(function (err) {{
        console.warn('dcv: could not typeset math: ' + err);
      }});
      return;
    }}
    if (Date.now() < deadline) {{
      setTimeout(typeset, {poll});
    }} else {{
      console.warn('dcv: MathJax not available after {timeout} ms');
    }}
  }}
  if (document.readyState === 'complete') {{
    typeset();
  }} else {{
    window.addEventListener('load', typeset);
  }}
}})();
</script>
"#,
        timeout = load_timeout_ms,
        poll = POLL_INTERVAL_MS,
    )
}

/// Append the typesetting bootstrap to the end of the document body.
pub fn inject_typeset_script(html: &str, load_timeout_ms: u64) -> String {
    inject_body_end(html, &typeset_script(load_timeout_ms))
}
