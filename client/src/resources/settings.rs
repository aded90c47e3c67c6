//! Settings Lookup Tables
//!
//! Industries, regional states, sub-cities, staff sizes and currencies.
//! Each is a plain JSON CRUD collection.

use reqwest::Method;
use serde_json::json;
use zw_common::{
    Currency, CurrencyForm, Industry, IndustryForm, RegionalState, RegionalStateForm, StaffSize,
    StaffSizeForm, SubCity, SubCityForm,
};

use super::{Deletable, Editable, Request, Resource, Scope};
use crate::error::ApiError;

/// Lookup records deserialize straight into the shared model.
macro_rules! lookup_resource {
    ($record:ty, $name:literal, $path:literal, $id:ident) => {
        impl Resource for $record {
            type Dto = Self;
            const NAME: &'static str = $name;

            fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
                Ok(Some($path.to_string()))
            }

            fn from_dto(dto: Self::Dto) -> Self {
                dto
            }

            fn id(&self) -> &str {
                &self.$id
            }
        }

        impl Deletable for $record {
            fn delete_path(record: &Self) -> String {
                format!("{}/{}", $path, record.$id)
            }
        }
    };
}

lookup_resource!(Industry, "industries", "/compliance/industries", industry_id);
lookup_resource!(RegionalState, "states", "/compliance/states", state_id);
lookup_resource!(SubCity, "sub-cities", "/compliance/sub-city", sub_city_id);
lookup_resource!(StaffSize, "staff sizes", "/compliance/staffsizes", staff_size_id);
lookup_resource!(Currency, "currencies", "/currencies", id);

impl Editable for Industry {
    type Form = IndustryForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::POST,
            "/compliance/industries",
            &json!({ "industryName": form.industry_name.trim() }),
        )
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/compliance/industries/{}", record.industry_id),
            &json!({ "industryName": form.industry_name.trim() }),
        )
    }
}

impl Editable for RegionalState {
    type Form = RegionalStateForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::POST,
            "/compliance/states",
            &json!({ "stateName": form.state_name.trim() }),
        )
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/compliance/states/{}", record.state_id),
            &json!({ "stateName": form.state_name.trim() }),
        )
    }
}

impl Editable for SubCity {
    type Form = SubCityForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::POST,
            "/compliance/sub-city",
            &json!({ "subCityName": form.sub_city_name.trim(), "stateId": form.state_id }),
        )
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/compliance/sub-city/{}", record.sub_city_id),
            &json!({ "subCityName": form.sub_city_name.trim(), "stateId": form.state_id }),
        )
    }
}

impl Editable for StaffSize {
    type Form = StaffSizeForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::POST,
            "/compliance/staffsizes",
            &json!({ "staffSizeName": form.staff_size_name.trim() }),
        )
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/compliance/staffsizes/{}", record.staff_size_id),
            &json!({ "staffSizeName": form.staff_size_name.trim() }),
        )
    }
}

fn currency_body(form: &CurrencyForm) -> serde_json::Value {
    json!({
        "code": form.code.trim().to_uppercase(),
        "name": form.name.trim(),
        "symbol": form.symbol.trim(),
    })
}

impl Editable for Currency {
    type Form = CurrencyForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(Method::POST, "/currencies", &currency_body(form))
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/currencies/{}", record.id),
            &currency_body(form),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Payload;

    fn body(request: &Request) -> serde_json::Value {
        match &request.payload {
            Some(Payload::Json(value)) => value.clone(),
            other => panic!("expected JSON payload, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_city_requires_state() {
        let form = SubCityForm {
            sub_city_name: "Bole".into(),
            state_id: None,
        };
        let err = SubCity::create_request(&form, &Scope::default()).unwrap_err();
        assert_eq!(err.to_string(), "Sub-city name and state are required.");
    }

    #[test]
    fn test_sub_city_body() {
        let form = SubCityForm {
            sub_city_name: " Bole ".into(),
            state_id: Some("4".into()),
        };
        let request = SubCity::create_request(&form, &Scope::default()).unwrap();
        assert_eq!(body(&request), json!({"subCityName": "Bole", "stateId": "4"}));
    }

    #[test]
    fn test_industry_update_path() {
        let record = Industry {
            industry_id: "i-7".into(),
            industry_name: "Retail".into(),
            created_at: None,
            updated_at: None,
        };
        let form = IndustryForm {
            industry_name: "Wholesale".into(),
        };
        let request = Industry::update_request(&record, &form, &Scope::default()).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/compliance/industries/i-7");
        assert_eq!(Industry::delete_path(&record), "/compliance/industries/i-7");
    }

    #[test]
    fn test_currency_code_uppercased() {
        let form = CurrencyForm {
            code: "usd".into(),
            name: "US Dollar".into(),
            symbol: "$".into(),
        };
        let request = Currency::create_request(&form, &Scope::default()).unwrap();
        assert_eq!(body(&request)["code"], "USD");
    }
}
