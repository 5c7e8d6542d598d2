//! Files written into a fresh staging directory.

use serde_json::json;

pub const ELECTRON_VERSION: &str = "^5.0.0";
pub const ELECTRON_PACKAGER_VERSION: &str = "^13.1.1";

/// Entry script of the rendering shell. Loads the staged web application.
pub const MAIN_JS_TEMPLATE: &str = r#"const { app, BrowserWindow } = require('electron');
const path = require('path');

let win = null;

function createWindow() {
  win = new BrowserWindow({ width: 800, height: 600, show: false });
  win.loadFile(path.join(__dirname, 'assets', 'index.html'));
  win.once('ready-to-show', () => win.show());
  win.on('closed', () => { win = null; });
}

app.on('ready', createWindow);
app.on('window-all-closed', () => app.quit());
"#;

/// `package.json` of the rendering shell.
pub fn package_json(name: &str) -> String {
  let manifest = json!({
    "name": name,
    "version": crate::consts::SHELL_APP_VERSION,
    "main": "main.js",
    "scripts": { "start": "electron ." },
    "devDependencies": {
      "electron": ELECTRON_VERSION,
      "electron-packager": ELECTRON_PACKAGER_VERSION,
    },
  });
  // A json! object always serializes.
  serde_json::to_string_pretty(&manifest).unwrap_or_default() + "\n"
}
