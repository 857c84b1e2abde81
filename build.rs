use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    let table_path = Path::new("endpoints.json");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    println!("cargo:rerun-if-changed={}", table_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    // Read the endpoint table
    let table_content = fs::read_to_string(table_path).expect("Failed to read endpoints.json");
    let table: Table =
        serde_json::from_str(&table_content).expect("Failed to parse endpoints.json");

    // Reject authoring mistakes before generating anything
    validate(&table);

    let endpoints = generate_endpoints(&table);
    let methods = generate_client_methods(&table);

    fs::write(
        out_dir.join("endpoints.rs"),
        prettyplease_format(&endpoints).unwrap_or(endpoints),
    )
    .expect("Failed to write endpoints.rs");
    fs::write(
        out_dir.join("client_methods.rs"),
        prettyplease_format(&methods).unwrap_or(methods),
    )
    .expect("Failed to write client_methods.rs");
}

fn prettyplease_format(code: &str) -> Option<String> {
    let syntax_tree = syn::parse_file(code).ok()?;
    Some(prettyplease::unparse(&syntax_tree))
}

#[derive(Deserialize)]
struct Table {
    groups: Vec<Group>,
}

#[derive(Deserialize)]
struct Group {
    title: String,
    endpoints: Vec<EndpointDef>,
}

#[derive(Deserialize)]
struct EndpointDef {
    /// Request type name without the `Request` suffix.
    name: String,
    /// Client method name.
    method: String,
    /// Path below `/api/v5/explorer/`.
    path: String,
    doc: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default)]
    batch: Option<BatchParam>,
    #[serde(default)]
    required: Vec<Param>,
    #[serde(default)]
    optional: Vec<Param>,
}

#[derive(Deserialize)]
struct Param {
    field: String,
    param: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
struct BatchParam {
    field: String,
    param: String,
    #[serde(rename = "type")]
    ty: String,
    max: usize,
}

fn default_output() -> String {
    "serde_json::Value".to_string()
}

impl EndpointDef {
    fn request_type(&self) -> String {
        format!("{}Request", self.name)
    }

    fn has_params(&self) -> bool {
        self.batch.is_some() || !self.required.is_empty() || !self.optional.is_empty()
    }
}

/// Panics on duplicate names, methods or paths, duplicate parameters within an
/// endpoint, and batch parameters without a positive maximum.
fn validate(table: &Table) {
    let mut names = HashSet::new();
    let mut methods = HashSet::new();
    let mut paths = HashSet::new();

    for endpoint in table.groups.iter().flat_map(|g| &g.endpoints) {
        assert!(
            names.insert(endpoint.name.as_str()),
            "duplicate endpoint name `{}`",
            endpoint.name
        );
        assert!(
            methods.insert(endpoint.method.as_str()),
            "duplicate client method `{}`",
            endpoint.method
        );
        assert!(
            paths.insert(endpoint.path.as_str()),
            "endpoint `{}` reuses path `{}`",
            endpoint.name,
            endpoint.path
        );
        assert!(
            !endpoint.path.starts_with('/') && !endpoint.path.contains('?'),
            "endpoint `{}` path must be relative and query-free",
            endpoint.name
        );

        let mut fields = HashSet::new();
        let mut params = HashSet::new();
        if let Some(batch) = &endpoint.batch {
            assert!(
                batch.max > 0,
                "endpoint `{}` batch `{}` needs a positive max",
                endpoint.name,
                batch.param
            );
            fields.insert(batch.field.as_str());
            params.insert(batch.param.as_str());
        }
        for param in endpoint.required.iter().chain(&endpoint.optional) {
            assert!(
                fields.insert(param.field.as_str()) && params.insert(param.param.as_str()),
                "endpoint `{}` declares `{}` twice",
                endpoint.name,
                param.param
            );
        }
    }
}

/// Types passed by value in constructors and setters; everything else goes
/// through `impl Into<_>`.
fn is_primitive(ty: &str) -> bool {
    matches!(ty, "u32" | "u64" | "i64" | "bool")
}

fn arg_type(ty: &str) -> String {
    if is_primitive(ty) {
        ty.to_string()
    } else {
        format!("impl Into<{ty}>")
    }
}

fn arg_value(name: &str, ty: &str) -> String {
    if is_primitive(ty) {
        name.to_string()
    } else {
        format!("{name}.into()")
    }
}

fn doc_attr(text: &str) -> String {
    format!("#[doc = {text:?}]\n")
}

fn generate_endpoints(table: &Table) -> String {
    let mut code = String::new();

    for group in &table.groups {
        for endpoint in &group.endpoints {
            write_request_struct(&mut code, endpoint);
            write_request_impl(&mut code, endpoint);
            write_endpoint_impl(&mut code, endpoint);
        }
    }

    code.push_str(&doc_attr("Every generated endpoint, in table order."));
    code.push_str("pub const ENDPOINTS: &[EndpointInfo] = &[\n");
    for group in &table.groups {
        for endpoint in &group.endpoints {
            let (batch_param, batch_limit) = match &endpoint.batch {
                Some(batch) => (
                    format!("Some({:?})", batch.param),
                    format!("Some({})", batch.max),
                ),
                None => ("None".to_string(), "None".to_string()),
            };
            writeln!(
                code,
                "EndpointInfo {{ name: {:?}, group: {:?}, path: {:?}, batch_param: {batch_param}, batch_limit: {batch_limit} }},",
                endpoint.method, group.title, endpoint.path,
            )
            .unwrap();
        }
    }
    code.push_str("];\n");

    code
}

fn write_request_struct(code: &mut String, endpoint: &EndpointDef) {
    code.push_str(&doc_attr(&endpoint.doc));
    code.push_str(&doc_attr(""));
    code.push_str(&doc_attr(&format!(
        "`GET /api/v5/explorer/{}`",
        endpoint.path
    )));

    let derives = if endpoint.batch.is_none() && endpoint.required.is_empty() {
        "Debug, Clone, Default, PartialEq"
    } else {
        "Debug, Clone, PartialEq"
    };
    writeln!(code, "#[derive({derives})]").unwrap();
    writeln!(code, "pub struct {} {{", endpoint.request_type()).unwrap();

    if let Some(batch) = &endpoint.batch {
        code.push_str(&doc_attr(&format!(
            "`{}`, comma-joined; at most {} entries.",
            batch.param, batch.max
        )));
        writeln!(code, "pub {}: Vec<{}>,", batch.field, batch.ty).unwrap();
    }
    for param in &endpoint.required {
        code.push_str(&doc_attr(&format!("`{}`", param.param)));
        writeln!(code, "pub {}: {},", param.field, param.ty).unwrap();
    }
    for param in &endpoint.optional {
        code.push_str(&doc_attr(&format!("`{}`, omitted when `None`.", param.param)));
        writeln!(code, "pub {}: Option<{}>,", param.field, param.ty).unwrap();
    }

    code.push_str("}\n\n");
}

fn write_request_impl(code: &mut String, endpoint: &EndpointDef) {
    let mut args = Vec::new();
    let mut inits = Vec::new();

    if let Some(batch) = &endpoint.batch {
        args.push(format!(
            "{}: impl IntoIterator<Item = impl Into<{}>>",
            batch.field, batch.ty
        ));
        inits.push(format!(
            "{}: {}.into_iter().map(Into::into).collect()",
            batch.field, batch.field
        ));
    }
    for param in &endpoint.required {
        args.push(format!("{}: {}", param.field, arg_type(&param.ty)));
        inits.push(format!(
            "{}: {}",
            param.field,
            arg_value(&param.field, &param.ty)
        ));
    }
    for param in &endpoint.optional {
        inits.push(format!("{}: None", param.field));
    }

    writeln!(code, "impl {} {{", endpoint.request_type()).unwrap();
    code.push_str(&doc_attr("Request with every optional parameter unset."));
    writeln!(
        code,
        "pub fn new({}) -> Self {{ Self {{ {} }} }}",
        args.join(", "),
        inits.join(", ")
    )
    .unwrap();

    for param in &endpoint.optional {
        code.push_str(&doc_attr(&format!("Set `{}`.", param.param)));
        writeln!(
            code,
            "pub fn {field}(mut self, {field}: {ty}) -> Self {{ self.{field} = Some({value}); self }}",
            field = param.field,
            ty = arg_type(&param.ty),
            value = arg_value(&param.field, &param.ty),
        )
        .unwrap();
    }

    code.push_str("}\n\n");
}

fn write_endpoint_impl(code: &mut String, endpoint: &EndpointDef) {
    writeln!(code, "impl Endpoint for {} {{", endpoint.request_type()).unwrap();
    writeln!(code, "type Output = {};", endpoint.output).unwrap();
    writeln!(code, "const PATH: &'static str = {:?};", endpoint.path).unwrap();
    if let Some(batch) = &endpoint.batch {
        writeln!(code, "const BATCH_LIMIT: Option<usize> = Some({});", batch.max).unwrap();
    }

    let params_ident = if endpoint.has_params() {
        "params"
    } else {
        "_params"
    };
    writeln!(
        code,
        "fn write_params(&self, {params_ident}: &mut QueryParams) -> Result<(), ValidationError> {{"
    )
    .unwrap();
    if let Some(batch) = &endpoint.batch {
        writeln!(
            code,
            "params.push_batch({:?}, &self.{}, {})?;",
            batch.param, batch.field, batch.max
        )
        .unwrap();
    }
    for param in &endpoint.required {
        writeln!(code, "params.push({:?}, &self.{})?;", param.param, param.field).unwrap();
    }
    for param in &endpoint.optional {
        writeln!(
            code,
            "params.push_opt({:?}, self.{}.as_ref());",
            param.param, param.field
        )
        .unwrap();
    }
    code.push_str("Ok(())\n}\n}\n\n");
}

fn generate_client_methods(table: &Table) -> String {
    let mut code = String::new();

    for group in &table.groups {
        code.push_str("impl OklinkClient {\n");
        for endpoint in &group.endpoints {
            code.push_str(&doc_attr(&endpoint.doc));
            code.push_str(&doc_attr(""));
            code.push_str(&doc_attr(&format!(
                "`GET /api/v5/explorer/{}`",
                endpoint.path
            )));
            writeln!(
                code,
                "pub async fn {}(&self, request: {}) -> Result<Envelope<{}>> {{ self.execute(&request).await }}",
                endpoint.method,
                endpoint.request_type(),
                endpoint.output,
            )
            .unwrap();
        }
        code.push_str("}\n\n");
    }

    code
}
