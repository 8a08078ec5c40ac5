use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ExprUnary, Ident, Lit, Token, UnOp, parse_macro_input};

/// Builds a `ParameterSet` at compile time, checking literal values.
///
/// Fields left out take their defaults. Keys may be written in Rust style
/// (`smooth_iterations`), with the host attribute name (`smoothIterations`)
/// or with the host short name (`smiter`).
///
/// Literal values are checked while compiling:
/// - `smoothing` and `frequency` must be within 0 to 1
/// - `smooth_iterations` must be at least 1
/// - `wave` must be `Noise`, `Sine`, `"noise"` or `"sine"`
///
/// Any other expression is passed through unchecked and clamped at
/// evaluation time like any runtime value.
///
/// # Examples
///
/// ```ignore
/// use animnoise::params;
///
/// let shake = params! {
///     smoothing: 0.8,
///     amplitude: 3,
///     seed: 42,
///     wave: Noise,
/// };
///
/// // Fails to compile: smoothing is out of range
/// let bad = params! { smoothing: 1.5 };
/// ```
#[proc_macro]
pub fn params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ParamList);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => {
            let error_msg = format!("Invalid params!: {}", e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

struct ParamEntry {
    key: Ident,
    value: Expr,
}

impl Parse for ParamEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let value: Expr = input.parse()?;
        Ok(ParamEntry { key, value })
    }
}

struct ParamList {
    entries: Punctuated<ParamEntry, Token![,]>,
}

impl Parse for ParamList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(ParamList {
            entries: Punctuated::parse_terminated(input)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Smoothing,
    Offset,
    Amplitude,
    Frequency,
    Seed,
    SmoothIterations,
    Rectify,
    Phase,
    Wave,
}

impl Field {
    fn ident(self) -> &'static str {
        match self {
            Field::Smoothing => "smoothing",
            Field::Offset => "offset",
            Field::Amplitude => "amplitude",
            Field::Frequency => "frequency",
            Field::Seed => "seed",
            Field::SmoothIterations => "smooth_iterations",
            Field::Rectify => "rectify",
            Field::Phase => "phase",
            Field::Wave => "wave",
        }
    }

    fn is_real(self) -> bool {
        matches!(
            self,
            Field::Smoothing | Field::Offset | Field::Amplitude | Field::Frequency | Field::Phase
        )
    }
}

fn resolve_key(key: &str) -> Result<Field, String> {
    match key {
        "smoothing" | "smooth" => Ok(Field::Smoothing),
        "offset" | "off" => Ok(Field::Offset),
        "amplitude" | "amp" => Ok(Field::Amplitude),
        "frequency" => Ok(Field::Frequency),
        "seed" => Ok(Field::Seed),
        "smooth_iterations" | "smoothIterations" | "smiter" => Ok(Field::SmoothIterations),
        "rectify" | "rect" => Ok(Field::Rectify),
        "phase" | "p" => Ok(Field::Phase),
        "wave" | "wav" => Ok(Field::Wave),
        _ => Err(format!("unknown parameter '{}'", key)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaveName {
    Noise,
    Sine,
}

fn parse_wave_name(s: &str) -> Result<WaveName, String> {
    match s.trim().to_lowercase().as_str() {
        "noise" => Ok(WaveName::Noise),
        "sine" => Ok(WaveName::Sine),
        _ => Err(format!("invalid wave '{}' (expected noise or sine)", s)),
    }
}

/// Checks a literal value against the field's valid range.
fn check_literal(field: Field, value: f64) -> Result<(), String> {
    match field {
        Field::Smoothing | Field::Frequency if !(0.0..=1.0).contains(&value) => Err(format!(
            "{} {} out of range (0 to 1)",
            field.ident(),
            value
        )),
        Field::SmoothIterations if value < 1.0 => {
            Err(format!("smooth_iterations {} must be at least 1", value))
        }
        _ => Ok(()),
    }
}

/// Numeric value of a literal, with an optional leading minus.
fn literal_number(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Float(f), ..
        }) => f.base10_parse::<f64>().ok(),
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => i.base10_parse::<f64>().ok(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => literal_number(expr).map(|v| -v),
        Expr::Group(group) => literal_number(&group.expr),
        Expr::Paren(paren) => literal_number(&paren.expr),
        _ => None,
    }
}

fn is_int_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(_), .. }) => true,
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => is_int_literal(expr),
        Expr::Group(group) => is_int_literal(&group.expr),
        Expr::Paren(paren) => is_int_literal(&paren.expr),
        _ => false,
    }
}

fn wave_tokens(expr: &Expr) -> Result<Option<TokenStream2>, String> {
    let name = match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => parse_wave_name(&s.value())?,
        Expr::Path(path) if path.qself.is_none() && path.path.segments.len() == 1 => {
            match path.path.segments[0].ident.to_string().as_str() {
                "Noise" => WaveName::Noise,
                "Sine" => WaveName::Sine,
                _ => return Ok(None),
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(match name {
        WaveName::Noise => quote! { ::animnoise::Wave::Noise },
        WaveName::Sine => quote! { ::animnoise::Wave::Sine },
    }))
}

fn value_tokens(field: Field, expr: &Expr) -> Result<TokenStream2, String> {
    if field == Field::Wave {
        return Ok(wave_tokens(expr)?.unwrap_or_else(|| quote! { #expr }));
    }

    if let Some(number) = literal_number(expr) {
        check_literal(field, number)?;
        if field.is_real() {
            let lit = Literal::f64_suffixed(number.abs());
            return Ok(if number < 0.0 { quote! { -#lit } } else { quote! { #lit } });
        }
        if matches!(field, Field::Seed | Field::SmoothIterations) && !is_int_literal(expr) {
            return Err(format!("{} must be an integer, got {}", field.ident(), number));
        }
    }

    Ok(quote! { #expr })
}

fn expand(input: &ParamList) -> Result<TokenStream2, String> {
    let mut seen: Vec<Field> = Vec::new();
    let mut assignments = Vec::new();

    for entry in &input.entries {
        let key = entry.key.to_string();
        let field = resolve_key(&key)?;
        if seen.contains(&field) {
            return Err(format!("parameter '{}' given more than once", field.ident()));
        }
        seen.push(field);

        let ident = Ident::new(field.ident(), entry.key.span());
        let value = value_tokens(field, &entry.value)?;
        assignments.push(quote! { #ident: #value, });
    }

    Ok(quote! {
        ::animnoise::ParameterSet {
            #(#assignments)*
            ..::animnoise::ParameterSet::DEFAULT
        }
    })
}
