use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Image Converter</title>
</head>
<body>
  <h1>Image Converter</h1>
  <form action="/convert" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".png,.jpg,.jpeg,.gif" required>
    <select name="convert_to">
      <option value="png">PNG</option>
      <option value="jpg">JPEG</option>
      <option value="gif">GIF</option>
    </select>
    <button type="submit">Convert</button>
  </form>
</body>
</html>
"#;

pub fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `converted_file` must already be a secure filename; it is inserted as-is.
pub fn result(converted_file: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Conversion complete</title>
</head>
<body>
  <h1>Conversion complete</h1>
  <p>{name}</p>
  <a href="/download/{name}">Download</a>
  <p><a href="/">Convert another image</a></p>
</body>
</html>
"#,
        name = converted_file
    ))
}
