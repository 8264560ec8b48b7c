use serde_json::json;

mod templates {
    dry_mustache::directory!("templates/");
    dry_mustache::file!("template/button.mustache");
    //language=html
    dry_mustache::str!("hello_first_last", r#"
        <p>Hello {{firstname}} {{lastname}}</p>
    "#);
}

fn main() {
    env_logger::init();

    let todos = json!({
        "title": "Shopping",
        "todos": [
            {"id": 1, "label": "Milk", "done": false},
            {"id": 2, "label": "Eggs & ham", "done": true}
        ]
    });
    let html = templates::todo_list().render(&todos);
    println!("{}", html);

    let single = templates::todo().render(&json!({"id": 3, "label": "Call home", "done": false}));
    println!("{}", single);

    let html2 = templates::button().render(&json!({"id": 43, "label": "Single File Todo"}));
    println!("{}", html2);

    let html3 = templates::hello_first_last().render(&json!({"firstname": "King", "lastname": "Tubby"}));
    println!("{}", html3);

    let runtime = dry_mustache::compile_str("{{#names}}[{{.}}]{{/names}}");
    match runtime {
        Ok(template) => println!("{}", template.render(&json!({"names": ["a", "b"]}))),
        Err(err) => log::error!("{}", err),
    }
}
