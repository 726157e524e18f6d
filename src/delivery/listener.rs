//! Companion listener: a tiny HTTP server running inside the editor
//!
//! Protocol:
//! - `GET /ping` answers 200 while the listener runs
//! - `POST /save` takes a file name and content, either as a JSON body
//!   `{"filename": "...", "content": "..."}` or as multipart form data with a
//!   `file` field; saving `init.lua` reloads the config
//!
//! Both endpoints require `Authorization: Bearer <token>` when the listener
//! was started with a token.

use serde::{Deserialize, Serialize};

use super::{DeliveryContext, DeliveryError};

/// Request body encoding for `POST /save`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveEncoding {
    Json,
    #[default]
    Multipart,
}

impl SaveEncoding {
    pub fn parse(s: &str) -> Option<SaveEncoding> {
        match s {
            "json" => Some(SaveEncoding::Json),
            "multipart" => Some(SaveEncoding::Multipart),
            _ => None,
        }
    }
}

/// Successful `POST /save` reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Serialize)]
struct JsonSave<'a> {
    filename: &'a str,
    content: &'a str,
}

fn authorized<B>(request: ureq::RequestBuilder<B>, token: Option<&str>) -> ureq::RequestBuilder<B> {
    match token {
        Some(token) => request.header("Authorization", format!("Bearer {}", token)),
        None => request,
    }
}

/// Liveness check; `Ok` only for a 2xx answer
pub fn ping(ctx: &mut DeliveryContext) -> Result<(), DeliveryError> {
    let url = format!("{}/ping", ctx.config().listener_url());
    let token = ctx.config().listener_token.clone();

    let mut response = authorized(ctx.agent().get(&url), token.as_deref())
        .call()
        .map_err(|e| DeliveryError::Unreachable(e.to_string()))?;

    let status = response.status().as_u16();
    if response.status().is_success() {
        tracing::debug!("Listener at {} is alive", url);
        Ok(())
    } else {
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Err(DeliveryError::Rejected {
            status,
            message: error_message(&body, status),
        })
    }
}

/// Send a file to the listener
pub fn save(
    ctx: &mut DeliveryContext,
    file_name: &str,
    content: &str,
    encoding: SaveEncoding,
) -> Result<SaveResponse, DeliveryError> {
    let url = format!("{}/save", ctx.config().listener_url());
    let token = ctx.config().listener_token.clone();
    let request = authorized(ctx.agent().post(&url), token.as_deref());

    let result = match encoding {
        SaveEncoding::Json => request.send_json(JsonSave {
            filename: file_name,
            content,
        }),
        SaveEncoding::Multipart => {
            let boundary = multipart_boundary(content);
            request
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .send(multipart_body(&boundary, file_name, content))
        }
    };
    let mut response = result.map_err(|e| DeliveryError::Unreachable(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| DeliveryError::Unreachable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DeliveryError::Rejected {
            status,
            message: error_message(&body, status),
        });
    }

    let reply: SaveResponse = serde_json::from_str(&body).unwrap_or(SaveResponse {
        success: true,
        message: None,
        path: None,
    });
    tracing::info!(
        "Listener saved {} to {}",
        file_name,
        reply.path.as_deref().unwrap_or("<unknown>")
    );
    Ok(reply)
}

/// `error` field of a JSON error body, else a generic status message
fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// A boundary string that does not occur in `content`
pub(crate) fn multipart_boundary(content: &str) -> String {
    let seed = chrono::Utc::now().timestamp_micros();
    let mut n = 0u32;
    loop {
        let boundary = format!("nvim-wizard-{:x}-{}", seed, n);
        if !content.contains(&boundary) {
            return boundary;
        }
        n += 1;
    }
}

pub(crate) fn multipart_body(boundary: &str, file_name: &str, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
         Content-Type: text/plain\r\n\r\n{content}\r\n--{b}--\r\n",
        b = boundary,
        name = file_name.replace('"', "%22"),
        content = content
    )
}

/// Lua snippet that starts the companion listener inside the editor
pub fn listener_script(port: u16, token: Option<&str>) -> String {
    let token_line = match token {
        Some(token) => format!("local auth_token = {}", crate::generator::lua_string(token)),
        None => "local auth_token = nil".to_string(),
    };
    LISTENER_TEMPLATE
        .replace("{{PORT}}", &port.to_string())
        .replace("{{TOKEN}}", &token_line)
}

const LISTENER_TEMPLATE: &str = r#"-- nvim-wizard listener: receives generated configs over HTTP
local function start_wizard_listener()
  local uv = vim.uv or vim.loop
  local port = {{PORT}}
  {{TOKEN}}
  local config_dir = vim.fn.stdpath("config")

  local function respond(client, status, body)
    local head = table.concat({
      "HTTP/1.1 " .. status,
      "Content-Type: application/json",
      "Content-Length: " .. #body,
      "Access-Control-Allow-Origin: *",
      "Access-Control-Allow-Methods: GET, POST, OPTIONS",
      "Access-Control-Allow-Headers: Content-Type, Authorization",
      "Connection: close",
    }, "\r\n")
    client:write(head .. "\r\n\r\n" .. body)
    client:close()
  end

  local function parse_headers(block)
    local headers = {}
    for line in block:gmatch("[^\r\n]+") do
      local key, value = line:match("^([^:]+):%s*(.-)%s*$")
      if key then
        headers[key:lower()] = value
      end
    end
    return headers
  end

  local function multipart_file(body, boundary)
    local delimiter = "--" .. boundary
    local pos = 1
    while true do
      local start = body:find(delimiter, pos, true)
      if not start then
        return nil
      end
      local section_start = start + #delimiter
      local next_start = body:find(delimiter, section_start, true)
      if not next_start then
        return nil
      end
      local section = body:sub(section_start, next_start - 1):gsub("^\r\n", "")
      local split = section:find("\r\n\r\n", 1, true)
      if split then
        local head = section:sub(1, split - 1)
        if head:match('name="file"') then
          local content = section:sub(split + 4):gsub("\r\n$", "")
          return head:match('filename="([^"]*)"'), content
        end
      end
      pos = next_start
    end
  end

  local function decode_save(headers, body)
    local content_type = headers["content-type"] or ""
    if content_type:find("application/json", 1, true) then
      local ok, data = pcall(vim.json.decode, body)
      if ok and type(data) == "table" then
        return data.filename, data.content
      end
      return nil
    end
    local boundary = content_type:match("boundary=([^;%s]+)")
    if boundary then
      return multipart_file(body, boundary)
    end
    return nil
  end

  local function handle(client, method, path, headers, body)
    if method == "OPTIONS" then
      return respond(client, "200 OK", "{}")
    end
    if auth_token and headers["authorization"] ~= "Bearer " .. auth_token then
      return respond(client, "401 Unauthorized", '{"error": "Invalid or missing token"}')
    end
    if method == "GET" and path == "/ping" then
      return respond(client, "200 OK", '{"status": "ok", "message": "Neovim listener active"}')
    end
    if method ~= "POST" or path ~= "/save" then
      return respond(client, "404 Not Found", '{"error": "Not found"}')
    end

    local filename, content = decode_save(headers, body)
    if not filename or not content or content == "" then
      return respond(client, "400 Bad Request", '{"error": "Missing file name or content"}')
    end
    if not filename:match("^[%w%._%-]+$") or filename:find("..", 1, true) then
      return respond(client, "400 Bad Request", '{"error": "Invalid file name"}')
    end

    local file_path = config_dir .. "/" .. filename
    local file = io.open(file_path, "w")
    if not file then
      return respond(client, "500 Internal Server Error", '{"error": "Failed to write file"}')
    end
    file:write(content)
    file:close()

    if filename == "init.lua" then
      vim.schedule(function()
        vim.notify("Config updated from nvim-wizard", vim.log.levels.INFO)
        vim.cmd("source " .. vim.fn.fnameescape(file_path))
      end)
    end
    respond(client, "200 OK", vim.json.encode({
      success = true,
      message = "File saved successfully",
      path = file_path,
    }))
  end

  local server = uv.new_tcp()
  server:bind("127.0.0.1", port)
  server:listen(128, function(err)
    if err then
      vim.schedule(function()
        vim.notify("nvim-wizard listener failed: " .. err, vim.log.levels.ERROR)
      end)
      return
    end

    local client = uv.new_tcp()
    server:accept(client)
    local buffer = ""
    client:read_start(function(read_err, chunk)
      if read_err or not chunk then
        client:close()
        return
      end
      buffer = buffer .. chunk

      local header_end = buffer:find("\r\n\r\n", 1, true)
      if not header_end then
        return
      end
      local method, path = buffer:match("^(%S+)%s+(%S+)")
      local first_line_end = buffer:find("\r\n", 1, true)
      local headers = parse_headers(buffer:sub(first_line_end + 2, header_end - 1))
      local length = tonumber(headers["content-length"] or "0") or 0
      local body_start = header_end + 4
      if #buffer - body_start + 1 < length then
        return
      end

      client:read_stop()
      handle(client, method, path, headers, buffer:sub(body_start, body_start + length - 1))
    end)
  end)

  vim.notify("nvim-wizard listener started on port " .. port, vim.log.levels.INFO)
  _G.nvim_wizard_listener = server
end

start_wizard_listener()
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_script_defaults() {
        let script = listener_script(45831, None);
        assert!(script.contains("local port = 45831"));
        assert!(script.contains("local auth_token = nil"));
        assert!(!script.contains("{{"));
    }

    #[test]
    fn test_listener_script_token_is_quoted() {
        let script = listener_script(9000, Some("s3cr'et"));
        assert!(script.contains("local port = 9000"));
        assert!(script.contains("local auth_token = 's3cr\\'et'"));
    }

    #[test]
    fn test_multipart_body_shape() {
        let body = multipart_body("XYZ", "init.lua", "print(1)");
        assert!(body.starts_with("--XYZ\r\n"));
        assert!(body.contains("name=\"file\"; filename=\"init.lua\""));
        assert!(body.contains("\r\n\r\nprint(1)\r\n--XYZ--\r\n"));
    }

    #[test]
    fn test_boundary_avoids_content() {
        let content = "nothing special";
        assert!(!content.contains(&multipart_boundary(content)));
    }

    #[test]
    fn test_error_message_prefers_json_error() {
        assert_eq!(error_message("{\"error\": \"nope\"}", 400), "nope");
        assert_eq!(error_message("<html>", 502), "HTTP 502");
    }
}
