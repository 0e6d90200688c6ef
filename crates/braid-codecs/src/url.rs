//! URL 编解码器：以字符串书写的 [`Url`]。

use std::sync::LazyLock;

use braid_core::{Codec, CodecError, CodecExt, ComapFlatMap, DataResult, STRING, StringCodec};
use ::url::Url;

/// [`URL`] 的具体类型。
pub type UrlCodec = ComapFlatMap<StringCodec, Url, fn(String) -> DataResult<Url>, fn(&Url) -> String>;

fn parse(text: String) -> DataResult<Url> {
    match Url::parse(&text) {
        Ok(url) => DataResult::success(url),
        Err(error) => DataResult::error(CodecError::validation(format!("Malformed URL: {error}"))),
    }
}

fn render(url: &Url) -> String {
    url.as_str().to_owned()
}

/// 任意协议的 URL。解析失败返回 `ValidationFailure` `"Malformed URL: <原因>"`。
pub static URL: LazyLock<UrlCodec> = LazyLock::new(|| {
    STRING.comap_flat_map(
        parse as fn(String) -> DataResult<Url>,
        render as fn(&Url) -> String,
    )
});

/// 限定协议的 URL，协议名比较不区分大小写。
///
/// ```
/// use braid_codecs::{Codec, Value, ValueOps, url};
///
/// let https = url("https");
/// assert!(https.decode(&ValueOps, &Value::from("https://example.com")).is_success());
/// assert!(https.decode(&ValueOps, &Value::from("ftp://example.com")).is_error());
/// ```
pub fn url(protocol: impl Into<String>) -> impl Codec<Value = Url> {
    let protocol = protocol.into();
    (&*URL).validate_with(move |url| {
        if url.scheme().eq_ignore_ascii_case(&protocol) {
            DataResult::success(url)
        } else {
            DataResult::error(CodecError::validation(format!(
                "Expected protocol '{protocol}' but found '{}'",
                url.scheme()
            )))
        }
    })
}
