//! The Go hook template

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Import path of the mutex package used by thread-safe hooks
pub const SYNC_PACKAGE: &str = "sync";

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by hoog; DO NOT EDIT.";

/// Every slot of the hook template, fully resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookTemplate {
    pub package_name: String,
    /// Imports needed by the method signature, without `sync`
    pub imports: Vec<String>,
    pub hook_name: String,
    /// The hooked interface as written in the generated file
    pub interface_ref: String,
    pub method_name: String,
    pub declaration_args: Vec<String>,
    pub call_args: Vec<String>,
    pub thread_safe: bool,
    /// Receiver name of the hook's methods
    pub receiver: String,
    /// Loop variable of the forwarding method
    pub entry: String,
}

impl HookTemplate {
    /// Imports written to the file; `sync` joins when the hook is guarded
    pub fn file_imports(&self) -> Vec<String> {
        let mut imports: BTreeSet<String> = self.imports.iter().cloned().collect();
        if self.thread_safe {
            imports.insert(SYNC_PACKAGE.to_string());
        }
        imports.into_iter().collect()
    }

    /// Render gofmt-style Go source
    pub fn render(&self) -> String {
        let mut code = String::new();

        code.push_str(GENERATED_HEADER);
        code.push_str("\n\n");
        code.push_str(&format!("package {}\n\n", self.package_name));

        let imports = self.file_imports();
        if !imports.is_empty() {
            code.push_str("import (\n");
            for import in &imports {
                code.push_str(&format!("\t\"{}\"\n", import));
            }
            code.push_str(")\n\n");
        }

        self.render_types(&mut code);
        self.render_append(&mut code);
        self.render_remove(&mut code);
        self.render_forward(&mut code);

        code
    }

    fn render_types(&self, code: &mut String) {
        code.push_str(&format!(
            "// {} calls {} on every appended {} in the order they were appended.\n",
            self.hook_name, self.method_name, self.interface_ref
        ));
        code.push_str(&format!("type {} struct {{\n", self.hook_name));
        code.push_str("\tlist []*hooked\n");
        if self.thread_safe {
            code.push_str("\tmu   sync.Mutex\n");
        }
        code.push_str("}\n\n");

        code.push_str("type hooked struct {\n");
        code.push_str(&format!("\t{}\n", self.interface_ref));
        code.push_str("}\n\n");

        code.push_str("// Cancel removes the entry it was returned for.\n");
        code.push_str("type Cancel = func()\n\n");
    }

    fn render_append(&self, code: &mut String) {
        let r = &self.receiver;

        code.push_str("// Append registers item and returns a Cancel that removes it again.\n");
        code.push_str(&format!(
            "func ({} *{}) Append(item {}) Cancel {{\n",
            r, self.hook_name, self.interface_ref
        ));
        self.render_lock(code);
        code.push_str("\tentry := &hooked{item}\n");
        code.push_str(&format!("\t{r}.list = append({r}.list, entry)\n\n"));
        code.push_str(&format!("\treturn func() {{ {r}.remove(entry) }}\n"));
        code.push_str("}\n\n");
    }

    fn render_remove(&self, code: &mut String) {
        let r = &self.receiver;

        code.push_str(&format!(
            "func ({} *{}) remove(entry *hooked) {{\n",
            r, self.hook_name
        ));
        self.render_lock(code);
        code.push_str(&format!("\tfor i := range {r}.list {{\n"));
        code.push_str(&format!("\t\tif {r}.list[i] == entry {{\n"));
        code.push_str(&format!(
            "\t\t\t{r}.list = append({r}.list[:i], {r}.list[i+1:]...)\n"
        ));
        code.push_str("\t\t\tbreak\n");
        code.push_str("\t\t}\n");
        code.push_str("\t}\n");
        code.push_str("}\n\n");
    }

    fn render_forward(&self, code: &mut String) {
        let r = &self.receiver;

        code.push_str(&format!(
            "// {} calls {} on every appended entry.\n",
            self.method_name, self.method_name
        ));
        code.push_str(&format!(
            "func ({} *{}) {}({}) {{\n",
            r,
            self.hook_name,
            self.method_name,
            self.declaration_args.join(", ")
        ));
        self.render_lock(code);
        code.push_str(&format!("\tfor _, {} := range {}.list {{\n", self.entry, r));
        code.push_str(&format!(
            "\t\t{}.{}({})\n",
            self.entry,
            self.method_name,
            self.call_args.join(", ")
        ));
        code.push_str("\t}\n");
        code.push_str("}\n");
    }

    fn render_lock(&self, code: &mut String) {
        if self.thread_safe {
            code.push_str(&format!("\t{}.mu.Lock()\n", self.receiver));
            code.push_str(&format!("\tdefer {}.mu.Unlock()\n\n", self.receiver));
        }
    }
}
